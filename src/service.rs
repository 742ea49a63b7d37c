use anyhow::Result;
use rmcp::{
    handler::server::{wrapper::Parameters, ServerHandler, tool::ToolRouter},
    model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    ErrorData as McpError,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::cache::{ForecastCache, SystemClock};
use crate::client::OpenMeteoClient;
use crate::config::Config;
use crate::debounce::Debouncer;
use crate::error::DashboardError;
use crate::forecast::ForecastStore;
use crate::formatters::{format_dashboard, format_suggestions};
use crate::location::{LocationResolver, NoPosition, ReportedPosition};
use crate::models::{AllowLocationRequest, Coordinates, SearchLocationRequest, SelectSuggestionRequest};
use crate::session::{Dashboard, Session};

/// MCP server driving one dashboard session
#[derive(Clone)]
pub struct WeatherDashboard {
    session: Arc<Mutex<Session>>,
    debouncer: Arc<Debouncer>,
    tool_router: ToolRouter<Self>,
}

impl WeatherDashboard {
    /// Creates a server backed by the Open-Meteo APIs
    pub fn new(config: Config) -> Result<Self> {
        let client = Arc::new(OpenMeteoClient::new(&config)?);

        let session = Session::new(
            LocationResolver::new(client.clone(), config.geolocation_timeout),
            ForecastStore::new(client, ForecastCache::new(config.cache_ttl), Arc::new(SystemClock)),
            Arc::new(NoPosition),
        );

        Ok(Self::with_session(session, config.suggestion_debounce))
    }

    pub fn with_session(session: Session, suggestion_debounce: Duration) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            debouncer: Arc::new(Debouncer::new(suggestion_debounce)),
            tool_router: Self::tool_router(),
        }
    }

    fn render(result: Result<Dashboard, DashboardError>) -> CallToolResult {
        match result {
            Ok(dashboard) => CallToolResult::success(vec![Content::text(format_dashboard(&dashboard))]),
            Err(e) => {
                tracing::warn!("Dashboard update failed: {}", e);
                CallToolResult::error(vec![Content::text(e.user_message())])
            }
        }
    }
}

#[tool_handler]
impl ServerHandler for WeatherDashboard {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "weather-dashboard".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "A weather dashboard powered by Open-Meteo. Pick a location (device position, \
                default location or search), then read current, hourly and daily conditions. \
                Forecasts are cached for five minutes per location and unit."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl WeatherDashboard {
    /// Uses the device position, or the default location if none is available
    #[tool(description = "Allow location access. Pass the device latitude and longitude if known; without them the dashboard falls back to London and says so.")]
    async fn allow_location(
        &self,
        Parameters(request): Parameters<AllowLocationRequest>,
    ) -> Result<CallToolResult, McpError> {
        let mut session = self.session.lock().await;

        let result = match (request.latitude, request.longitude) {
            (Some(latitude), Some(longitude)) => {
                let provider = ReportedPosition(Coordinates { latitude, longitude });
                session.locate(&provider).await
            }
            _ => session.locate_device().await,
        };

        Ok(Self::render(result))
    }

    #[tool(description = "Deny location access and show the weather for the default location (London, UK).")]
    async fn deny_location(&self) -> Result<CallToolResult, McpError> {
        let mut session = self.session.lock().await;
        Ok(Self::render(session.use_default_location().await))
    }

    #[tool(description = "Search for a place by name (e.g. 'Paris') and show its weather using the top match.")]
    async fn search_location(
        &self,
        Parameters(request): Parameters<SearchLocationRequest>,
    ) -> Result<CallToolResult, McpError> {
        // Pending suggestions belong to the old query
        self.debouncer.cancel();
        let mut session = self.session.lock().await;
        Ok(Self::render(session.search(&request.query).await))
    }

    /// Debounced lookup; a newer call supersedes a pending one
    #[tool(description = "List up to five places matching a partial name (at least two characters). Follow with select_suggestion.")]
    async fn suggest_locations(
        &self,
        Parameters(request): Parameters<SearchLocationRequest>,
    ) -> Result<CallToolResult, McpError> {
        let resolver = self.session.lock().await.resolver().clone();

        let superseded = || CallToolResult::success(vec![Content::text("Superseded by a newer query.")]);

        let Some((ticket, suggestions)) = resolver
            .suggest_debounced(&self.debouncer, &request.query)
            .await
        else {
            return Ok(superseded());
        };

        let mut session = self.session.lock().await;
        if !self.debouncer.is_current(ticket) {
            return Ok(superseded());
        }

        let formatted = format_suggestions(&suggestions);
        session.set_suggestions(suggestions);

        Ok(CallToolResult::success(vec![Content::text(formatted)]))
    }

    #[tool(description = "Show the weather for a place from the last suggestion list, by its number.")]
    async fn select_suggestion(
        &self,
        Parameters(request): Parameters<SelectSuggestionRequest>,
    ) -> Result<CallToolResult, McpError> {
        let mut session = self.session.lock().await;
        Ok(Self::render(session.select_suggestion(request.index).await))
    }

    #[tool(description = "Switch between Celsius and Fahrenheit and refresh the dashboard.")]
    async fn toggle_unit(&self) -> Result<CallToolResult, McpError> {
        let mut session = self.session.lock().await;

        match session.toggle_unit().await {
            Ok(Some(dashboard)) => Ok(Self::render(Ok(dashboard))),
            Ok(None) => Ok(CallToolResult::success(vec![Content::text(format!(
                "Unit set to {}. Choose a location to see the weather.",
                session.unit().symbol()
            ))])),
            Err(e) => Ok(Self::render(Err(e))),
        }
    }

    #[tool(description = "Retry the last weather fetch.")]
    async fn retry(&self) -> Result<CallToolResult, McpError> {
        let mut session = self.session.lock().await;
        Ok(Self::render(session.retry().await))
    }

    #[tool(description = "Show the dashboard for the current location and unit.")]
    async fn get_dashboard(&self) -> Result<CallToolResult, McpError> {
        let mut session = self.session.lock().await;
        Ok(Self::render(session.dashboard().await))
    }
}
