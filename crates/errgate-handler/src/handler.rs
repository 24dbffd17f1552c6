use std::fmt::Write as _;
use std::sync::Arc;

use errgate_config::{Config, ExceptionLogging, HttpStatus};
use errgate_core::{ApiErrorResponse, Failure, Locale};
use errgate_i18n::{CatalogError, MessageCatalog, StaticCatalog};
use indexmap::IndexMap;

use crate::mapper::{
    ApiErrorMapper, ConstraintViolationMapper, FallbackMapper, MappingContext, MessageNotReadableMapper,
    MethodArgumentNotValidMapper, OptimisticLockingMapper, SecurityMapper, TypeMismatchMapper,
};
use crate::{CodeResolver, MessageResolver, PropertyExtractor, defaults};

/// Errors raised while building an [`ErrorHandler`]
#[derive(Debug, thiserror::Error)]
pub enum HandlerBuildError {
    /// The configuration failed validation
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configured message catalog could not be loaded
    #[error("failed to load message catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// Turns failures into API error responses
///
/// Built once at startup and shared through `Arc`; handling a failure takes
/// no locks and never fails.
pub struct ErrorHandler {
    enabled: bool,
    codes: CodeResolver,
    messages: MessageResolver,
    message_overrides: IndexMap<String, String>,
    http_statuses: IndexMap<String, HttpStatus>,
    logging: ExceptionLogging,
    mappers: Vec<Box<dyn ApiErrorMapper>>,
}

impl std::fmt::Debug for ErrorHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorHandler")
            .field("enabled", &self.enabled)
            .field("strategy", &self.codes.strategy())
            .field("catalog", &self.messages.has_catalog())
            .field("mappers", &self.mappers.iter().map(|m| m.name()).collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl ErrorHandler {
    pub fn builder(config: &Config) -> ErrorHandlerBuilder {
        ErrorHandlerBuilder {
            config: config.clone(),
            catalog: None,
            custom_mappers: Vec::new(),
        }
    }

    /// Build a handler with the built-in mappers only
    ///
    /// # Errors
    ///
    /// See [`ErrorHandlerBuilder::build`]
    pub fn new(config: &Config) -> Result<Self, HandlerBuildError> {
        Self::builder(config).build()
    }

    /// Whether failures should be mapped at all
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Map a failure into a response for `locale`
    ///
    /// Mappers are tried in order; the fallback mapper answers when none of
    /// them recognizes the failure.
    pub fn handle(&self, failure: &dyn Failure, locale: &Locale) -> ApiErrorResponse {
        let cx = MappingContext {
            codes: &self.codes,
            messages: &self.messages,
            message_overrides: &self.message_overrides,
            http_statuses: &self.http_statuses,
            extractor: PropertyExtractor,
            locale,
        };

        let mapper: &dyn ApiErrorMapper = self
            .mappers
            .iter()
            .map(AsRef::as_ref)
            .find(|mapper| mapper.can_handle(failure))
            .unwrap_or(&FallbackMapper);

        let response = mapper.handle(failure, &cx);
        self.log(failure, mapper, &response);
        response
    }

    fn log(&self, failure: &dyn Failure, mapper: &dyn ApiErrorMapper, response: &ApiErrorResponse) {
        let detail = match self.logging {
            ExceptionLogging::NoLogging => return,
            ExceptionLogging::MessageOnly => failure.to_string(),
            ExceptionLogging::WithSources => with_sources(failure),
        };

        let status = response.http_status().as_u16();

        if response.http_status().is_server_error() {
            tracing::error!(
                failure = failure.type_key(),
                mapper = mapper.name(),
                status,
                code = response.code(),
                "{detail}"
            );
        } else {
            tracing::debug!(
                failure = failure.type_key(),
                mapper = mapper.name(),
                status,
                code = response.code(),
                "{detail}"
            );
        }
    }
}

fn with_sources(failure: &dyn Failure) -> String {
    let mut text = failure.to_string();
    let mut source = failure.source();

    while let Some(err) = source {
        let _ = write!(text, ": caused by: {err}");
        source = err.source();
    }

    text
}

/// Assembles an [`ErrorHandler`] from configuration
pub struct ErrorHandlerBuilder {
    config: Config,
    catalog: Option<Arc<dyn MessageCatalog>>,
    custom_mappers: Vec<Box<dyn ApiErrorMapper>>,
}

impl ErrorHandlerBuilder {
    /// Use this catalog instead of the one configured under `[catalog]`
    #[must_use]
    pub fn catalog(self, catalog: impl MessageCatalog + 'static) -> Self {
        self.shared_catalog(Arc::new(catalog))
    }

    #[must_use]
    pub fn shared_catalog(mut self, catalog: Arc<dyn MessageCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Register a mapper that is consulted before the built-in ones
    ///
    /// Custom mappers run in registration order.
    #[must_use]
    pub fn mapper(mut self, mapper: impl ApiErrorMapper + 'static) -> Self {
        self.custom_mappers.push(Box::new(mapper));
        self
    }

    /// Validate the configuration, load the catalog and freeze the chain
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the configured
    /// catalog directory cannot be loaded
    pub fn build(self) -> Result<ErrorHandler, HandlerBuildError> {
        let Self {
            config,
            catalog,
            custom_mappers,
        } = self;

        config
            .validate()
            .map_err(|e| HandlerBuildError::InvalidConfig(format!("{e:#}")))?;

        let catalog = match (catalog, &config.catalog) {
            (Some(catalog), _) => Some(catalog),
            (None, Some(settings)) => {
                let mut loaded = StaticCatalog::from_dir(&settings.directory, &settings.basename)?;
                if let Some(ref locale) = settings.default_locale {
                    loaded = loaded.with_default_locale(Locale::new(locale));
                }
                tracing::info!(
                    directory = %settings.directory.display(),
                    messages = loaded.len(),
                    "message catalog loaded"
                );
                Some(Arc::new(loaded) as Arc<dyn MessageCatalog>)
            }
            (None, None) => None,
        };

        let mut mappers = custom_mappers;
        mappers.extend(builtin_mappers());

        Ok(ErrorHandler {
            enabled: config.enabled,
            codes: CodeResolver::new(defaults::merged_codes(&config.codes), config.default_code_strategy),
            messages: MessageResolver::new(catalog),
            message_overrides: config.messages,
            http_statuses: config.http_statuses,
            logging: config.exception_logging,
            mappers,
        })
    }
}

fn builtin_mappers() -> Vec<Box<dyn ApiErrorMapper>> {
    vec![
        Box::new(TypeMismatchMapper),
        Box::new(ConstraintViolationMapper),
        Box::new(MessageNotReadableMapper),
        Box::new(MethodArgumentNotValidMapper),
        Box::new(SecurityMapper),
        Box::new(OptimisticLockingMapper),
    ]
}
