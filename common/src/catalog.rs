//! Catalog module
//!
//! The catalog is the fixed list of opportunities documents are matched
//! against, plus the per-organization shortlist predicates. It comes from a
//! JSON file or one of the built-in presets.

use crate::error::{Error, Result};
use crate::predicate::{Predicate, PredicateKeyword};
use crate::types::CatalogEntry;
use serde::{Deserialize, Serialize};

/// Names accepted by [`Catalog::from_preset`]
pub const PRESET_NAMES: &[&str] = &["outreachy-2017-orgs", "outreachy-2017-projects"];

// C, but not the C of C++
const C_LANG: &str = r"C(?!\+\+)";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub entries: Vec<CatalogEntry>,
    #[serde(default)]
    pub predicates: Vec<Predicate>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self {
            entries,
            predicates: Vec::new(),
        }
    }

    pub fn with_predicates(mut self, predicates: Vec<Predicate>) -> Self {
        self.predicates = predicates;
        self
    }

    /// Built-in catalog by name
    pub fn from_preset(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "outreachy-2017-orgs" | "orgs" => Ok(Self::organizations_2017()),
            "outreachy-2017-projects" | "projects" => Ok(Self::projects_2017()),
            _ => Err(Error::UnknownPreset(name.to_string())),
        }
    }

    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let catalog: Self = serde_json::from_str(json)?;
        for (index, entry) in catalog.entries.iter().enumerate() {
            if entry.name.trim().is_empty() {
                return Err(Error::Config(format!("entry {} has no name", index)));
            }
        }
        Ok(catalog)
    }

    /// Organization names compare case-insensitively, as `--org` does.
    pub fn contains_name(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name.eq_ignore_ascii_case(name))
    }

    /// Distinct organization names in catalog order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !names.contains(&entry.name.as_str()) {
                names.push(entry.name.as_str());
            }
        }
        names
    }

    pub fn predicate_for(&self, organization: &str) -> Option<&Predicate> {
        self.predicates
            .iter()
            .find(|p| p.organization.eq_ignore_ascii_case(organization))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One entry per organization, with required and optional keywords
    fn organizations_2017() -> Self {
        let entry = |name: &str, required: &[&str], optional: &[&str]| {
            CatalogEntry::new(name, "", required.iter().copied(), optional.iter().copied())
        };

        let entries = vec![
            entry("Outreachy", &["open source", "free software"], &["Linux", "Unix", "Solaris"]),
            entry(
                "Cadasta",
                &["Python", "Django", "JavaScript", "HTML", "OAuth", "Selenium"],
                &["front-end", "back-end"],
            ),
            entry(
                "Ceph",
                &["Python", "storage", "file system", "file systems", "distributed system", "distributed systems"],
                &[C_LANG, r"C\+\+", "Linux", "probability", "statistics", "front-end", "design", "operating systems"],
            ),
            entry(
                "Debian",
                &[
                    "Debian", "Linux", "Greek", "scientific", "linear algebra", "optimization", "gcc",
                    "localization", "documentation", "internationalization",
                ],
                &["Python", "Perl"],
            ),
            entry("Discourse", &["rails", "ember.js", "JavaScript"], &["OpenCollective", "Slack", "chat"]),
            entry(
                "Fedora",
                &["design", "graphics", "artist", "Fedora", "Linux", "storyboard", "storyboarding"],
                &["Inkscape", "Scribus"],
            ),
            entry("GNOME", &["GTK", C_LANG, "Linux"], &["Python", "Vala", "maps"]),
            entry("Lagome", &["Java"], &["Scala", "REST", "reactive", "microservice", "microservices"]),
            entry("Linux kernel", &["Linux", "operating systems", C_LANG], &["networking", "memory"]),
            entry(
                "oVirt",
                &["Python", "JavaScript", "distributed systems", "distributed system"],
                &["react", "redux", "ES6"],
            ),
            entry(
                "QEMU",
                &[C_LANG, "Python", "virtualization"],
                &["audio", "GStreamer", "Linux", "PCI", "PCIe", "PCI Express", "block layer", "hypervisor"],
            ),
            entry("Sugar Labs", &["JavaScript", "documentation"], &["design", "graphics", "music", "audio"]),
            entry(
                "Wikimedia",
                &["JavaScript", "PHP", "documentation", "Hungarian"],
                &["localization", "MediaWiki", "wiki"],
            ),
            entry(
                "Wine",
                &[C_LANG, "Windows programming", "Win32", "computer graphics"],
                &[
                    "UI", "Direct3D", "OpenGL", "DirectDraw", "scripting", "PPC64", "PowerPC", "Sparc64",
                    "RISC-V", "x32", "dll", "PHP", "HTML", "MySQL",
                ],
            ),
        ];

        let required = |keywords: &[&str]| -> Vec<PredicateKeyword> {
            keywords.iter().map(|k| PredicateKeyword::required(*k)).collect()
        };
        let optional = |keywords: &[&str]| -> Vec<PredicateKeyword> {
            keywords.iter().map(|k| PredicateKeyword::optional(*k)).collect()
        };

        let predicates = vec![
            Predicate::union("Cadasta", required(&["django", "selenium", "oauth"])),
            Predicate::union(
                "Ceph",
                required(&["storage", "file system", "file systems", "distributed system", "distributed systems"]),
            ),
            Predicate::union("Debian", required(&["debian", "optimization", "gcc"])),
            Predicate::union("Discourse", required(&["rails", "ember.js"])),
            Predicate::union(
                "Fedora",
                [optional(&["inkscape"]), required(&["storyboard", "storyboarding", "fedora", "artist"])].concat(),
            ),
            Predicate::union("GNOME", required(&["gtk"])),
            Predicate::union("Lagome", optional(&["scala", "reactive"])),
            Predicate::union(
                "oVirt",
                [optional(&["react", "redux", "es6"]), required(&["distributed system", "distributed systems"])]
                    .concat(),
            ),
            Predicate::intersection("Linux kernel", required(&["linux", "operating systems"])),
        ];

        Self::new(entries).with_predicates(predicates)
    }

    /// One entry per project; every keyword is required
    fn projects_2017() -> Self {
        let project = |name: &str, description: &str, keywords: &[&str]| {
            CatalogEntry::new(name, description, keywords.iter().copied(), std::iter::empty())
        };

        let entries = vec![
            project("Cadasta", "enhancing user settings and creating a user dashboard", &["django"]),
            project("Cadasta", "adding additional login options", &["django|oauth"]),
            project("Cadasta", "improving automated test coverage", &["selenium"]),
            project(
                "Ceph",
                "creating a root cause analysis tool for Linux distributed systems",
                &["Linux", "distributed systems"],
            ),
            project(
                "Ceph",
                "evaluating the performance of new reweight algorithms for balancing storage utilization",
                &["statistics", "storage", "linux"],
            ),
            project(
                "Ceph",
                "design a status dashboard to visualize Ceph cluster statistics",
                &["python", "linux", "javascript", "html5", "css3"],
            ),
            project(
                "Ceph",
                "identify performance degradation in nodes and automate cluster response",
                &["Linux", "python", "distributed systems"],
            ),
            project(
                "Ceph",
                "design a simplified database backend for the Ceph Object Gateway",
                &["database", "Linux", r"C\+\+"],
            ),
            project(
                "Ceph",
                "port tests to the Amazon S3 and Openstack Swift storage protocols",
                &["python", "linux", "storage"],
            ),
            project("Debian", "benchmarking scientific packages", &["linux", "gcc"]),
            project("Debian", "improving the Debian test database and website", &["linux", "python", "sql", "shell"]),
            project("Debian", "enhancing the Debian test website", &["html", "css", "linux", "graphic"]),
            project("Discourse", "enhancing their forum and chat web services", &["rails", "javascript"]),
            project(
                "Fedora",
                "creating a coloring book to explain technical concepts",
                &["inkscape|scribus|storyboard|storyboarding|graphic design"],
            ),
            project("GNOME", "improving the recipes or maps applications", &["gtk"]),
            project("Lagome", "creating an online action sample app to showcase microservices", &["Scala"]),
            project(
                "Linux kernel",
                "analyze memory resource release operators and fix memory bugs",
                &["linux", "operating systems", "memory"],
            ),
            project("Linux kernel", "improve process ID allocation", &["linux", "operating systems", "kernel"]),
            project("Linux kernel", "improve nftables", &["linux", "operating systems", "networking"]),
            project("Mozilla", "PROJECT TBD", &["mozilla|firefox"]),
            project("oVirt", "implement oVirt integration tests using Lago and the REST API", &["python", "rest"]),
            project(
                "oVirt",
                "design an oVirt log analyzer for distributed systems",
                &["python", "linux", "distributed systems"],
            ),
            project("oVirt", "rewrite oVirt UI dialogs in modern JavaScript", &["es6|react|redux"]),
            project("QEMU", "rework the QEMU audio backend", &[C_LANG, "audio"]),
            project("QEMU", "create a full and incremental disk backup tool", &[C_LANG, "python", "storage"]),
            project("QEMU", "refactor the block layer's I/O throttling and write notifiers", &[C_LANG, "storage"]),
            project("QEMU", "code an emulated PCIe-to-PCI bridge", &["pci|pcie"]),
            project(
                "QEMU",
                "add x86 virtualization support on macOS using Hypervisor.framework",
                &[C_LANG, "mac", "virtualization"],
            ),
            project("QEMU", "extend the current vhost-pci based inter-VM communication", &[C_LANG, "pci"]),
            project("Sugar Labs", "improve Music Blocks", &["javascript", "music"]),
            project("Wikimedia", "write a Zotero translator and document process", &["javascript", "documentation"]),
            project("Wikimedia", "improve and fix bugs in the quiz extension", &["php", "documentation"]),
            project("Wikimedia", "create user guides to help with translation outreach", &["translation|localization"]),
            project("Wine", "implement resource editor and dialog editor", &[C_LANG, "Windows", "UI|UX"]),
            project("Wine", "implement missing D3DX9 APIs", &[C_LANG, "computer graphics"]),
            project("Wine", "implement Direct3D microbenchmarks", &[C_LANG, "opengl"]),
            project("Wine", "automated game benchmarks", &[C_LANG, "game engine"]),
            project("Wine", "port WineLib to a new architecture", &["PPC|PowerPC|Sparc|Sparc64|RISC-V"]),
            project("Wine", "improve the AppDB website", &["php", "html", "mysql"]),
            project("Xen Project", "create golang bindings for libxl", &["go", C_LANG]),
            project("Xen Project", "create rust bindings for libxl", &["rust"]),
            project("Xen Project", "KDD (Windows Debugger Stub) enhancements", &[C_LANG, "windows", "kernel|debugger"]),
            project("Xen Project", "fuzz testing the Xen hypercall interface", &[C_LANG, "assembly", "gcc"]),
            project("Xen Project", "improving Mirage OS, a unikernel that runs on top of Xen", &["ocaml"]),
            project("Xen Project", "create a Xen code review dashboard", &["sql", "javascript", "html5", "java"]),
            project(
                "Xen Project",
                "add more FreeBSD testing to osstest",
                &["freebsd|bsd|openbsd|netbsd|dragonfly"],
            ),
            project(
                "Yocto",
                "PROJECT TBD",
                &[
                    C_LANG,
                    "python",
                    "distro|linux|yocto|openembedded",
                    "embedded|robotics|beaglebone|beagle bone|minnow|minnowboard|arduino",
                ],
            ),
        ];

        let predicates = vec![
            Predicate::union("QEMU", vec![PredicateKeyword::required("audio"), PredicateKeyword::required("storage")]),
            Predicate::union(
                "Cadasta",
                vec![PredicateKeyword::required("django"), PredicateKeyword::required("selenium")],
            ),
        ];

        Self::new(entries).with_predicates(predicates)
    }
}
