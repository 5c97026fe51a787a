//! `$ref` resolution and scope tracking.
//!
//! Rather than mutating a single shared `base_uri`/`resolution_scope`/
//! `referrer` triple under push/pop discipline, this port threads an
//! immutable [`Context`] explicitly through the recursive evaluation call
//! tree (SPEC_FULL.md §4.3): descending into a scope or following a `$ref`
//! produces a *new* `Context` used only for the nested call, so there is
//! nothing to restore on exit — the parent's fields were never touched.
//! Only the document cache genuinely needs to be shared mutable state
//! across a whole validation run, and that is guarded by an `RwLock`,
//! mirroring the teacher's own `Resolver::store`.
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use ahash::AHashMap;
use percent_encoding::percent_decode_str;
use serde_json::{Map, Value};
use url::Url;

use crate::error::RefResolutionError;
use crate::format::FormatChecker;
use crate::paths::resolve_pointer;
use crate::primitive_type::TypeRegistry;
use crate::schemas::{id_of, Draft, DRAFT3_URI, DRAFT4_URI};

lazy_static::lazy_static! {
    static ref DEFAULT_ROOT_URL: Url = Url::parse("json-schema:///").expect("valid URL");
}

/// A source of schema documents for a URI scheme this crate does not
/// fetch natively. Implementations are pluggable: `reqwest` behind
/// `resolve-http`, plain file reads behind `resolve-file` (the default),
/// or a caller-supplied one for e.g. an in-memory test fixture store.
pub trait SchemeHandler: Send + Sync {
    fn fetch(&self, url: &Url) -> Result<Value, RefResolutionError>;
}

#[cfg(feature = "resolve-file")]
struct FileHandler;

#[cfg(feature = "resolve-file")]
impl SchemeHandler for FileHandler {
    fn fetch(&self, url: &Url) -> Result<Value, RefResolutionError> {
        let path = url.to_file_path().map_err(|()| RefResolutionError::NoHandler {
            scheme: "file".to_string(),
            uri: url.to_string(),
        })?;
        let bytes = std::fs::read(&path).map_err(|source| RefResolutionError::Fetch {
            uri: url.to_string(),
            source: Box::new(source),
        })?;
        serde_json::from_slice(&bytes).map_err(|source| RefResolutionError::InvalidJson {
            uri: url.to_string(),
            source,
        })
    }
}

#[cfg(feature = "resolve-http")]
struct HttpHandler;

#[cfg(feature = "resolve-http")]
impl SchemeHandler for HttpHandler {
    fn fetch(&self, url: &Url) -> Result<Value, RefResolutionError> {
        log::debug!("fetching remote schema {url}");
        let response = reqwest::blocking::get(url.as_str()).map_err(|source| RefResolutionError::Fetch {
            uri: url.to_string(),
            source: Box::new(source),
        })?;
        response.json().map_err(|source| RefResolutionError::Fetch {
            uri: url.to_string(),
            source: Box::new(source),
        })
    }
}

/// Tracks base URIs, the remote-document cache, and pluggable scheme
/// handlers. The resolution-scope stack itself is not stored here — see
/// [`Context`].
pub struct RefResolver {
    store: RwLock<AHashMap<String, Arc<Value>>>,
    cache_remote: bool,
    handlers: HashMap<String, Arc<dyn SchemeHandler>>,
}

impl RefResolver {
    /// A resolver pre-seeded with both embedded meta-schemas, satisfying
    /// the data-model invariant that `store` always knows them, without a
    /// remote fetch (SPEC_FULL.md §3).
    pub fn new(cache_remote: bool) -> Self {
        let mut store = AHashMap::new();
        store.insert(
            DRAFT3_URI.trim_end_matches('#').to_string(),
            Arc::new(crate::meta_schemas::draft3()),
        );
        store.insert(
            DRAFT4_URI.trim_end_matches('#').to_string(),
            Arc::new(crate::meta_schemas::draft4()),
        );
        let mut handlers: HashMap<String, Arc<dyn SchemeHandler>> = HashMap::new();
        #[cfg(feature = "resolve-file")]
        handlers.insert("file".to_string(), Arc::new(FileHandler));
        #[cfg(feature = "resolve-http")]
        {
            handlers.insert("http".to_string(), Arc::new(HttpHandler));
            handlers.insert("https".to_string(), Arc::new(HttpHandler));
        }
        RefResolver {
            store: RwLock::new(store),
            cache_remote,
            handlers,
        }
    }

    /// Register (or replace) the handler for `scheme`.
    pub fn register_handler(&mut self, scheme: impl Into<String>, handler: Arc<dyn SchemeHandler>) {
        self.handlers.insert(scheme.into(), handler);
    }

    fn resolve_remote(&self, uri: &Url) -> Result<Value, RefResolutionError> {
        let scheme = uri.scheme();
        match self.handlers.get(scheme) {
            Some(handler) => {
                log::debug!("resolving remote schema {uri} via {scheme} handler");
                handler.fetch(uri)
            }
            None => Err(RefResolutionError::NoHandler {
                scheme: scheme.to_string(),
                uri: uri.to_string(),
            }),
        }
    }

    /// `resolving($ref)`: resolve `reference` against `ctx`'s current
    /// scope, returning the child `Context` (scope/base_uri/referrer now
    /// pointing at the referenced document) together with the referenced
    /// value itself, cloned out of that document so the caller is free of
    /// the document's borrow.
    pub(crate) fn resolve_ref<'r>(
        &'r self,
        ctx: &Context<'r>,
        reference: &str,
    ) -> Result<(Context<'r>, Value), RefResolutionError> {
        let full = ctx.scope.join(reference).map_err(|source| RefResolutionError::InvalidUri {
            uri: reference.to_string(),
            source,
        })?;
        let mut uri = full.clone();
        uri.set_fragment(None);
        let fragment = full.fragment().unwrap_or("").to_string();

        let document: Arc<Value> = if uri == ctx.base_uri {
            Arc::clone(&ctx.referrer)
        } else if let Some(cached) = self.store.read().expect("store lock poisoned").get(uri.as_str()) {
            Arc::clone(cached)
        } else {
            log::trace!("cache miss for {uri}, fetching");
            let fetched = self.resolve_remote(&uri)?;
            let arc = Arc::new(fetched);
            if self.cache_remote {
                self.store
                    .write()
                    .expect("store lock poisoned")
                    .insert(uri.to_string(), Arc::clone(&arc));
            }
            arc
        };

        let decoded_fragment = percent_decode_str(&fragment)
            .decode_utf8()
            .map(|cow| cow.into_owned())
            .unwrap_or(fragment);
        let pointer = if decoded_fragment.is_empty() {
            String::new()
        } else if let Some(stripped) = decoded_fragment.strip_prefix('/') {
            format!("/{stripped}")
        } else {
            format!("/{decoded_fragment}")
        };
        let target = resolve_pointer(&document, &pointer)
            .ok_or_else(|| RefResolutionError::PointerNotFound {
                uri: uri.to_string(),
                pointer: pointer.clone(),
            })?
            .clone();

        log::debug!("resolved {reference} to {uri}{pointer}");
        let child = Context {
            draft: ctx.draft,
            resolver: self,
            base_uri: uri.clone(),
            scope: uri,
            referrer: document,
            fatal: ctx.fatal,
            formats: ctx.formats,
            types: ctx.types,
        };
        Ok((child, target))
    }
}

/// The threaded resolution context: current draft, current scope/base URI,
/// and the document those are relative to. Cheap to clone (a couple of
/// `Url`s and an `Arc` bump).
///
/// `fatal` is the one exception to "everything here is immutable and
/// explicitly threaded": a `$ref` that cannot be resolved is not a
/// [`crate::error::ValidationError`] to collect and keep walking past (it
/// is fatal for the whole run, SPEC_FULL.md §7), but the callback-driven
/// walk of `src/eval.rs` only has a `bool` to report "stop". `fatal` is the
/// side channel the `ref` keyword rule uses to hand the real error back up
/// to `Validator`, which checks it once the walk has stopped.
#[derive(Clone)]
pub(crate) struct Context<'r> {
    pub(crate) draft: Draft,
    pub(crate) resolver: &'r RefResolver,
    pub(crate) base_uri: Url,
    pub(crate) scope: Url,
    pub(crate) referrer: Arc<Value>,
    pub(crate) fatal: &'r RefCell<Option<RefResolutionError>>,
    /// The `format` keyword's checker, threaded the same way as everything
    /// else here rather than a global — the caller picks it once per
    /// top-level call (see `ValidationOptions`/`Validator`).
    pub(crate) formats: &'r FormatChecker,
    /// The `type` keyword's primitive-type membership tests, with any
    /// caller-registered overrides already applied.
    pub(crate) types: &'r TypeRegistry,
}

impl<'r> Context<'r> {
    /// The initial context for a top-level `validate`/`is_valid` call: scope
    /// and base URI seeded from the schema's own `id`, if declared.
    pub(crate) fn root(
        resolver: &'r RefResolver,
        draft: Draft,
        schema: Arc<Value>,
        fatal: &'r RefCell<Option<RefResolutionError>>,
        formats: &'r FormatChecker,
        types: &'r TypeRegistry,
    ) -> Self {
        let scope = match id_of(draft, &schema) {
            Some(id) => DEFAULT_ROOT_URL.join(id).unwrap_or_else(|_| DEFAULT_ROOT_URL.clone()),
            None => DEFAULT_ROOT_URL.clone(),
        };
        Context {
            draft,
            resolver,
            base_uri: scope.clone(),
            scope,
            referrer: schema,
            fatal,
            formats,
            types,
        }
    }

    /// Record a fatal resolution error for `Validator` to surface once the
    /// walk unwinds. Only the first one recorded is kept.
    pub(crate) fn record_resolution_error(&self, error: RefResolutionError) {
        let mut slot = self.fatal.borrow_mut();
        if slot.is_none() {
            *slot = Some(error);
        }
    }

    /// `in_scope(id)`: if `schema_obj` declares an `id`, push a new scope
    /// for the duration of evaluating it. Returns a fresh `Context`; `self`
    /// is untouched.
    pub(crate) fn enter_id(&self, schema_obj: &Map<String, Value>) -> Context<'r> {
        match schema_obj.get(self.draft.id_keyword()).and_then(Value::as_str) {
            Some(id) => {
                let mut next = self.clone();
                if let Ok(joined) = next.scope.join(id) {
                    log::trace!("entering scope {joined}");
                    next.scope = joined;
                }
                next
            }
            None => self.clone(),
        }
    }
}
