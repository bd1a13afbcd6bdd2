//! Target handles and resolver trait.
//!
//! Components address elements by canonical paths (e.g. `stairs/panel/3`). A host
//! resolver turns those paths into opaque handles once, in `prebind()`. Paths the
//! resolver does not know are treated as missing elements and dropped.

/// Opaque target handle (small string key).
pub type TargetHandle = String;

/// Trait for resolving canonical target paths to opaque handles.
/// Adapters (web/tests) implement this and pass it into `prebind()`.
pub trait TargetResolver {
    fn resolve(&mut self, path: &str) -> Option<TargetHandle>;
}

/// Resolver that maps every path onto itself. Used until a host resolver is bound.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityResolver;

impl TargetResolver for IdentityResolver {
    fn resolve(&mut self, path: &str) -> Option<TargetHandle> {
        Some(path.to_string())
    }
}

/// Resolve a list of paths, dropping (and logging) the ones the host cannot find.
pub fn resolve_all<'a, I>(resolver: &mut dyn TargetResolver, paths: I) -> Vec<TargetHandle>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out = Vec::new();
    for path in paths {
        match resolver.resolve(path) {
            Some(handle) => out.push(handle),
            None => log::warn!("target '{path}' did not resolve; it will not be animated"),
        }
    }
    out
}
