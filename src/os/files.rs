//! Catalog of simulated files referenced by job definitions.
//!
//! The workload parser records which jobs reference which files; the
//! simulation loop itself never consults the catalog.

/// Visibility of a simulated file. Everything in the standard catalog
/// starts out public.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Privacy {
    Public,
    Private,
}

#[derive(Debug, Clone)]
pub struct SimFile {
    name: String,
    size: u64,
    privacy: Privacy,
    owners: Vec<u32>,
}

impl SimFile {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            privacy: Privacy::Public,
            owners: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn is_private(&self) -> bool {
        self.privacy == Privacy::Private
    }

    pub fn add_owner(&mut self, job_id: u32) {
        self.owners.push(job_id);
    }

    pub fn is_owner(&self, job_id: u32) -> bool {
        self.owners.contains(&job_id)
    }
}

#[derive(Debug, Clone, Default)]
pub struct FileCatalog {
    files: Vec<SimFile>,
}

impl FileCatalog {
    /// The fixed set of files present on the simulated disc.
    pub fn standard() -> Self {
        let files = [
            ("calc", 32),
            ("pad", 16),
            ("minesweeper", 20),
            ("salt", 5),
            ("pepper", 10),
            ("tea", 48),
            ("coffee", 32),
        ]
        .into_iter()
        .map(|(name, size)| SimFile::new(name, size))
        .collect();
        Self { files }
    }

    pub fn get(&self, name: &str) -> Option<&SimFile> {
        self.files.iter().find(|file| file.name() == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut SimFile> {
        self.files.iter_mut().find(|file| file.name() == name)
    }

    pub fn files(&self) -> &[SimFile] {
        &self.files
    }
}
