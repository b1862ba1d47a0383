//! Properties provider
//!
//! The provider owns every [`Container`], parses properties sources and
//! routes each property into the container named by its module. Lookups
//! delegate to the matching container.
//!
//! Two lock domains are involved: the provider lock guards the container
//! registry, and each container guards its own items. They are never held
//! at the same time. Containers are never removed once registered, so a
//! handle obtained under the provider lock stays valid after it is released.

use crate::error::Result;
use crate::store::container::{Container, DEFAULT_CONTAINER_NAME};
use crate::store::item::Item;
use crate::store::parser::{classify_line, parse_property_name, Line, ParseOptions};
use parking_lot::Mutex;
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::{Arc, OnceLock};
use tracing::{debug, info, trace, warn};

/// Reserved module names registered by [`PropertiesProvider::register_system_modules`]
pub const SYSTEM_MODULES: &[&str] = &["SYSTEM", "LOG"];

static PROVIDER: OnceLock<PropertiesProvider> = OnceLock::new();

/// Outcome of importing a properties source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// Properties added to the store
    pub imported: usize,
    /// Non-blank, non-comment lines that could not be parsed
    pub skipped: usize,
    /// Comment lines
    pub comments: usize,
}

/// A property as seen from outside the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyEntry {
    pub module: String,
    pub name: String,
    pub value: String,
}

#[derive(Debug, Default)]
pub struct PropertiesProvider {
    containers: Mutex<Vec<Arc<Container>>>,
    options: ParseOptions,
}

impl PropertiesProvider {
    /// Create an isolated provider, independent of the process-wide one
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parse_options(options: ParseOptions) -> Self {
        Self {
            containers: Mutex::new(Vec::new()),
            options,
        }
    }

    /// The process-wide provider, created on first use
    pub fn global() -> &'static PropertiesProvider {
        PROVIDER.get_or_init(|| {
            debug!("Initializing process-wide properties provider");
            PropertiesProvider::new()
        })
    }

    pub fn get_provider() -> &'static PropertiesProvider {
        Self::global()
    }

    /// Import every property from the file at `path`.
    ///
    /// Fails if the file cannot be opened; malformed lines are skipped.
    pub fn import_properties<P: AsRef<Path>>(&self, path: P) -> Result<ImportReport> {
        let path = path.as_ref();
        info!("Importing properties from {}", path.display());

        let file = File::open(path)?;
        let report = self.import_reader(BufReader::new(file))?;

        info!(
            "Imported {} properties from {} ({} skipped)",
            report.imported,
            path.display(),
            report.skipped
        );
        Ok(report)
    }

    /// Import properties from any buffered reader. Lines read before an I/O
    /// failure stay imported.
    pub fn import_reader<R: BufRead>(&self, reader: R) -> Result<ImportReport> {
        let mut report = ImportReport::default();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line = if index == 0 {
                line.strip_prefix('\u{feff}').unwrap_or(&line).to_string()
            } else {
                line
            };

            self.import_line(index + 1, &line, &mut report);
        }

        Ok(report)
    }

    /// Import properties held in memory
    pub fn import_str(&self, contents: &str) -> ImportReport {
        let contents = contents.strip_prefix('\u{feff}').unwrap_or(contents);
        let mut report = ImportReport::default();

        for (index, line) in contents.lines().enumerate() {
            self.import_line(index + 1, line, &mut report);
        }

        report
    }

    fn import_line(&self, number: usize, line: &str, report: &mut ImportReport) {
        match classify_line(line, &self.options) {
            Line::Blank => {}
            Line::Comment => report.comments += 1,
            Line::Malformed => {
                warn!("Skipping malformed property at line {}: {}", number, line);
                report.skipped += 1;
            }
            Line::Property(property) => {
                let module = if property.is_qualified() {
                    property.module
                } else {
                    DEFAULT_CONTAINER_NAME
                };

                match self.add_property(module, property.name, property.value) {
                    Ok(()) => report.imported += 1,
                    Err(e) => {
                        warn!("Skipping property at line {}: {}", number, e);
                        report.skipped += 1;
                    }
                }
            }
        }
    }

    /// Add a property to the container named `module`, creating it on first use.
    /// An empty module targets the default container.
    pub fn add_property(&self, module: &str, name: &str, value: &str) -> Result<()> {
        let item = Item::new(name, value)?;
        let module = if module.is_empty() {
            DEFAULT_CONTAINER_NAME
        } else {
            module
        };

        let container = self.find_or_create(module)?;
        container.add_item(item);

        trace!("Added property {}.{}", module, name);
        Ok(())
    }

    /// Add an unqualified property to the default container
    pub fn add_default_property(&self, name: &str, value: &str) -> Result<()> {
        self.add_property(DEFAULT_CONTAINER_NAME, name, value)
    }

    /// Append every value of `module.name` to `values`.
    ///
    /// Returns false if the container does not exist or holds no such item.
    pub fn get_property_values(&self, module: &str, name: &str, values: &mut Vec<String>) -> bool {
        let module = if module.is_empty() {
            DEFAULT_CONTAINER_NAME
        } else {
            module
        };

        match self.container(module) {
            Some(container) => container.get_values(name, values) > 0,
            None => {
                trace!("No container for module {}", module);
                false
            }
        }
    }

    pub fn get_default_property_values(&self, name: &str, values: &mut Vec<String>) -> bool {
        self.get_property_values(DEFAULT_CONTAINER_NAME, name, values)
    }

    /// First value of a qualified (`module.name`) or unqualified property
    pub fn property_value(&self, qualified_name: &str) -> Option<String> {
        let (module, name) = parse_property_name(qualified_name)?;
        let mut values = Vec::new();

        if self.get_property_values(module, name, &mut values) {
            values.into_iter().next()
        } else {
            None
        }
    }

    pub fn container(&self, name: &str) -> Option<Arc<Container>> {
        self.containers
            .lock()
            .iter()
            .find(|container| container.equal(name))
            .cloned()
    }

    pub fn container_count(&self) -> usize {
        self.containers.lock().len()
    }

    pub fn container_names(&self) -> Vec<String> {
        self.containers
            .lock()
            .iter()
            .map(|container| container.name().to_string())
            .collect()
    }

    /// Every property, in container then item insertion order
    pub fn snapshot(&self) -> Vec<PropertyEntry> {
        let containers: Vec<Arc<Container>> = self.containers.lock().clone();

        containers
            .iter()
            .flat_map(|container| {
                container.items().into_iter().map(move |item| PropertyEntry {
                    module: container.name().to_string(),
                    name: item.name().to_string(),
                    value: item.value().to_string(),
                })
            })
            .collect()
    }

    /// Pre-create the containers for the reserved system modules
    pub fn register_system_modules(&self) -> Result<()> {
        for module in SYSTEM_MODULES {
            self.find_or_create(module)?;
        }
        Ok(())
    }

    fn find_or_create(&self, name: &str) -> Result<Arc<Container>> {
        let mut containers = self.containers.lock();

        if let Some(container) = containers.iter().find(|container| container.equal(name)) {
            return Ok(Arc::clone(container));
        }

        Self::new_container(&mut containers, name)
    }

    /// Register a new container. The caller must hold the provider lock.
    fn new_container(containers: &mut Vec<Arc<Container>>, name: &str) -> Result<Arc<Container>> {
        let container = Arc::new(Container::new(name)?);
        containers.push(Arc::clone(&container));
        Ok(container)
    }
}
