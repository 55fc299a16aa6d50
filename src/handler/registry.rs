//! Handler registry
//!
//! Maps `module/path.export` references to handlers. The reference given on
//! the command line is resolved against it once, at startup.

use std::collections::HashMap;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::rc::Rc;

use super::Handler;
use crate::error::ResolveError;

/// A `path/to/module.export` reference.
///
/// The final dot-separated segment is the export name; everything before it
/// is the module path, relative to the working directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HandlerRef {
    raw: String,
    module: String,
    export: String,
}

impl HandlerRef {
    pub fn parse(reference: &str) -> Self {
        let (module, export) = reference.rsplit_once('.').unwrap_or(("", reference));
        Self {
            raw: reference.to_string(),
            module: normalize_module(module),
            export: export.to_string(),
        }
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn export(&self) -> &str {
        &self.export
    }

    /// Module path resolved against `cwd`
    pub fn module_location(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.module)
    }

    fn key(&self) -> Result<(String, String), ResolveError> {
        if self.module.is_empty() || self.export.is_empty() {
            return Err(ResolveError::MissingExport(self.raw.clone()));
        }
        Ok((self.module.clone(), self.export.clone()))
    }
}

impl fmt::Display for HandlerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.module, self.export)
    }
}

/// Drop `.` components so `./src/index` and `src/index` name the same module
fn normalize_module(module: &str) -> String {
    Path::new(module)
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect::<PathBuf>()
        .to_string_lossy()
        .into_owned()
}

/// Registered handlers, keyed by module and export name
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<(String, String), Rc<dyn Handler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `reference`, replacing any previous entry.
    pub fn register<H>(&mut self, reference: &str, handler: H) -> Result<(), ResolveError>
    where
        H: Handler + 'static,
    {
        let key = HandlerRef::parse(reference).key()?;
        self.handlers.insert(key, Rc::new(handler));
        Ok(())
    }

    pub fn resolve(&self, reference: &HandlerRef) -> Result<Rc<dyn Handler>, ResolveError> {
        let key = reference.key()?;
        self.handlers
            .get(&key)
            .cloned()
            .ok_or_else(|| ResolveError::NotRegistered {
                module: key.0,
                export: key.1,
            })
    }

    /// Registered references, sorted
    pub fn references(&self) -> Vec<String> {
        let mut refs: Vec<String> = self
            .handlers
            .keys()
            .map(|(module, export)| format!("{module}.{export}"))
            .collect();
        refs.sort();
        refs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{AlbEvent, AlbResponse, Context};
    use crate::handler::handler_fn;

    fn ok_handler() -> impl Handler {
        handler_fn(|_event: AlbEvent, _ctx: Context| async {
            Ok::<_, std::io::Error>(AlbResponse::new(200))
        })
    }

    #[test]
    fn test_parse_reference() {
        let reference = HandlerRef::parse("src/index.handler");
        assert_eq!(reference.module(), "src/index");
        assert_eq!(reference.export(), "handler");
        assert_eq!(reference.to_string(), "src/index.handler");
    }

    #[test]
    fn test_parse_keeps_inner_dots_in_module() {
        let reference = HandlerRef::parse("lib/v1.2/app.main");
        assert_eq!(reference.module(), "lib/v1.2/app");
        assert_eq!(reference.export(), "main");
    }

    #[test]
    fn test_parse_strips_current_dir() {
        let reference = HandlerRef::parse("./demo/./echo.handler");
        assert_eq!(reference.module(), "demo/echo");
        assert_eq!(
            reference.module_location(Path::new("/work")),
            PathBuf::from("/work/demo/echo")
        );
    }

    #[test]
    fn test_resolve_registered_handler() {
        let mut registry = HandlerRegistry::new();
        registry.register("demo/echo.handler", ok_handler()).unwrap();

        assert!(registry
            .resolve(&HandlerRef::parse("./demo/echo.handler"))
            .is_ok());
        assert_eq!(registry.references(), vec!["demo/echo.handler".to_string()]);
    }

    #[test]
    fn test_resolve_unknown_handler() {
        let registry = HandlerRegistry::new();
        let err = registry
            .resolve(&HandlerRef::parse("src/index.handler"))
            .err()
            .unwrap();
        assert_eq!(
            err,
            ResolveError::NotRegistered {
                module: "src/index".to_string(),
                export: "handler".to_string(),
            }
        );
    }

    #[test]
    fn test_resolve_wrong_export() {
        let mut registry = HandlerRegistry::new();
        registry.register("src/index.handler", ok_handler()).unwrap();
        assert!(registry
            .resolve(&HandlerRef::parse("src/index.other"))
            .is_err());
    }

    #[test]
    fn test_reference_without_export() {
        let registry = HandlerRegistry::new();
        let err = registry.resolve(&HandlerRef::parse("index")).err().unwrap();
        assert_eq!(err, ResolveError::MissingExport("index".to_string()));

        let err = registry.resolve(&HandlerRef::parse("index.")).err().unwrap();
        assert_eq!(err, ResolveError::MissingExport("index.".to_string()));

        let mut registry = HandlerRegistry::new();
        assert!(registry.register("nodot", ok_handler()).is_err());
    }
}
