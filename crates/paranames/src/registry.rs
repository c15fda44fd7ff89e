use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use thiserror::Error;

use paranames_classfile::ClassFile;

use crate::member::LoadedClass;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("class file error: {0}")]
    ClassFile(#[from] paranames_classfile::Error),
}

/// One classpath element the registry resolves classes against.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RegistryEntry {
    /// A directory laid out by package, holding `.class` files.
    ClassDir(PathBuf),
    /// A jar archive.
    Jar(PathBuf),
}

impl RegistryEntry {
    /// Classify a classpath element by shape: `.jar` paths become
    /// [`RegistryEntry::Jar`], everything else a class directory.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("jar") => RegistryEntry::Jar(path),
            _ => RegistryEntry::ClassDir(path),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            RegistryEntry::ClassDir(p) | RegistryEntry::Jar(p) => p,
        }
    }

    fn read_class(&self, relative: &str) -> Result<Option<Vec<u8>>, RegistryError> {
        match self {
            RegistryEntry::ClassDir(dir) => {
                let path = dir.join(relative);
                if !path.is_file() {
                    return Ok(None);
                }
                Ok(Some(std::fs::read(path)?))
            }
            RegistryEntry::Jar(path) => {
                let file = std::fs::File::open(path)?;
                let mut archive = zip::ZipArchive::new(file)?;
                let mut entry = match archive.by_name(relative) {
                    Ok(entry) => entry,
                    Err(zip::result::ZipError::FileNotFound) => return Ok(None),
                    Err(err) => return Err(err.into()),
                };
                let mut bytes = Vec::with_capacity(entry.size() as usize);
                entry.read_to_end(&mut bytes)?;
                Ok(Some(bytes))
            }
        }
    }
}

/// The loading context within which class names resolve to classes.
///
/// Entries are searched in order, first hit wins, mirroring JVM
/// classpath semantics. Parsed classes are cached behind an `RwLock`,
/// so a registry is safe to share across threads by reference.
#[derive(Debug, Default)]
pub struct ClassRegistry {
    entries: Vec<RegistryEntry>,
    cache: RwLock<HashMap<String, Arc<LoadedClass>>>,
}

impl ClassRegistry {
    pub fn new(entries: Vec<RegistryEntry>) -> Self {
        Self {
            entries,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    /// A registry with no entries has no metadata source at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load and parse the class with the given binary name
    /// (`com.example.Sample`). `Ok(None)` when no entry provides it;
    /// malformed names (empty, or containing path separators) are
    /// treated the same way.
    pub fn load(&self, binary_name: &str) -> Result<Option<Arc<LoadedClass>>, RegistryError> {
        if binary_name.is_empty() || binary_name.contains(['/', '\\']) {
            return Ok(None);
        }
        if let Some(hit) = self
            .cache
            .read()
            .expect("class cache lock poisoned")
            .get(binary_name)
        {
            return Ok(Some(Arc::clone(hit)));
        }

        let relative = format!("{}.class", binary_name.replace('.', "/"));
        for entry in &self.entries {
            let Some(bytes) = entry.read_class(&relative)? else {
                continue;
            };
            let file = ClassFile::parse(&bytes)?;
            let loaded = Arc::new(LoadedClass::new(binary_name.to_string(), file)?);
            self.cache
                .write()
                .expect("class cache lock poisoned")
                .insert(binary_name.to_string(), Arc::clone(&loaded));
            tracing::trace!(class = binary_name, entry = %entry.path().display(), "class loaded");
            return Ok(Some(loaded));
        }
        Ok(None)
    }
}
