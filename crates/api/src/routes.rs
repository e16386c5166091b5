use crate::error::ApiError;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use fxfolio_core::domain::alert::MarketAlert;
use fxfolio_core::domain::company::{CeoProfile, Company};
use fxfolio_core::domain::contract::{
    CeoProfilePayload, CompanyPayload, FinancialsPayload, MarketAlertPayload, NewsArticlePayload,
    PositionPayload, PositionUpdatePayload,
};
use fxfolio_core::domain::currency::{CurrencyForecast, CurrencyRateRecord};
use fxfolio_core::domain::market::{StockPrice, TradeAction, TradingAnalysis};
use fxfolio_core::domain::news::NewsArticle;
use fxfolio_core::domain::portfolio::{DividendProjection, PortfolioPosition, PortfolioSummary};
use fxfolio_core::domain::recommendation::AiRecommendation;
use fxfolio_core::domain::Id;
use fxfolio_core::notify::{deliver, messages};
use fxfolio_core::services::refresh::RefreshReport;
use fxfolio_core::services::Services;
use fxfolio_core::storage::DEFAULT_NEWS_LIMIT;

type ApiResult<T> = Result<Json<T>, ApiError>;

#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    /// Owner of every portfolio position served by this instance.
    pub user_id: Id,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/companies", get(list_companies).post(create_company))
        .route("/api/companies/:id/financials", put(update_financials))
        .route("/api/portfolio/summary", get(portfolio_summary))
        .route(
            "/api/portfolio/positions",
            get(list_positions).post(create_position),
        )
        .route(
            "/api/portfolio/positions/:id",
            put(update_position).delete(delete_position),
        )
        .route("/api/portfolio/dividends", get(dividends))
        .route("/api/stocks/:ticker/price", get(stock_price))
        .route("/api/stocks/:ticker/trading-analysis", get(trading_analysis))
        .route("/api/ai/recommendations", get(list_recommendations))
        .route(
            "/api/ai/generate-recommendations",
            post(generate_recommendations),
        )
        .route("/api/ai/currency-forecast", get(currency_forecast))
        .route("/api/currency/rates", get(currency_rates))
        .route("/api/currency/update-rates", post(update_rates))
        .route(
            "/api/ceo-profiles",
            get(list_ceo_profiles).post(create_ceo_profile),
        )
        .route("/api/market/alerts", get(list_alerts).post(create_alert))
        .route("/api/market/alerts/:id/deactivate", post(deactivate_alert))
        .route("/api/market/monitor", post(monitor_market))
        .route("/api/news", get(list_news).post(create_news))
        .route("/api/notifications/test", post(test_notification))
        .route("/api/data/refresh", post(refresh_data))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}

/// A stored record with its company attached.
#[derive(Debug, Serialize)]
struct WithCompany<T> {
    #[serde(flatten)]
    item: T,
    company: Option<Company>,
}

fn with_company<T>(
    items: Vec<T>,
    companies: &[Company],
    company_id: impl Fn(&T) -> Option<Id>,
) -> Vec<WithCompany<T>> {
    items
        .into_iter()
        .map(|item| {
            let company = company_id(&item)
                .and_then(|id| companies.iter().find(|c| c.id == id))
                .cloned();
            WithCompany { item, company }
        })
        .collect()
}

#[derive(Debug, Serialize)]
struct Ack {
    success: bool,
    message: &'static str,
}

fn ack(message: &'static str) -> Json<Ack> {
    Json(Ack {
        success: true,
        message,
    })
}

/// Path ids that do not parse cannot name a stored record.
fn parse_id(raw: &str) -> Option<Id> {
    raw.parse::<Id>().ok().filter(|id| *id > 0)
}

async fn list_companies(State(state): State<AppState>) -> Json<Vec<Company>> {
    Json(state.services.store.companies())
}

async fn create_company(
    State(state): State<AppState>,
    payload: Result<Json<CompanyPayload>, JsonRejection>,
) -> ApiResult<Company> {
    const INVALID: &str = "Invalid company data";
    let Json(payload) = payload.map_err(|e| ApiError::invalid(INVALID, e))?;
    let new = payload
        .validate_and_into_new()
        .map_err(|e| ApiError::invalid(INVALID, e))?;

    let company = state.services.store.create_company(new);
    tracing::info!(company_id = company.id, ticker = %company.ticker, "company created");
    Ok(Json(company))
}

async fn update_financials(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<FinancialsPayload>, JsonRejection>,
) -> ApiResult<Company> {
    const NOT_FOUND: &str = "Company not found";
    let Json(payload) = payload.map_err(|e| ApiError::invalid("Invalid financials data", e))?;
    let id = parse_id(&id).ok_or(ApiError::not_found(NOT_FOUND))?;

    state
        .services
        .store
        .update_company_financials(id, payload.financials)
        .map(Json)
        .ok_or(ApiError::not_found(NOT_FOUND))
}

async fn portfolio_summary(State(state): State<AppState>) -> Json<PortfolioSummary> {
    Json(state.services.financial.portfolio_summary(state.user_id))
}

async fn list_positions(State(state): State<AppState>) -> Json<Vec<PortfolioPosition>> {
    Json(state.services.store.positions_for_user(state.user_id))
}

async fn create_position(
    State(state): State<AppState>,
    payload: Result<Json<PositionPayload>, JsonRejection>,
) -> ApiResult<PortfolioPosition> {
    const INVALID: &str = "Invalid position data";
    let Json(payload) = payload.map_err(|e| ApiError::invalid(INVALID, e))?;
    let new = payload
        .validate_and_into_new(state.user_id)
        .map_err(|e| ApiError::invalid(INVALID, e))?;

    let position = state.services.store.create_position(new);
    tracing::info!(
        position_id = position.id,
        company_id = position.company_id,
        shares = position.shares,
        "position created"
    );
    Ok(Json(position))
}

async fn update_position(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<PositionUpdatePayload>, JsonRejection>,
) -> ApiResult<PortfolioPosition> {
    const INVALID: &str = "Invalid position data";
    const NOT_FOUND: &str = "Position not found";
    let Json(payload) = payload.map_err(|e| ApiError::invalid(INVALID, e))?;
    let (shares, average_cost) = payload
        .validate()
        .map_err(|e| ApiError::invalid(INVALID, e))?;
    let id = parse_id(&id).ok_or(ApiError::not_found(NOT_FOUND))?;

    state
        .services
        .store
        .update_position(id, shares, average_cost)
        .map(Json)
        .ok_or(ApiError::not_found(NOT_FOUND))
}

async fn delete_position(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    const NOT_FOUND: &str = "Position not found";
    let id = parse_id(&id).ok_or(ApiError::not_found(NOT_FOUND))?;
    if !state.services.store.delete_position(id) {
        return Err(ApiError::not_found(NOT_FOUND));
    }
    tracing::info!(position_id = id, "position deleted");
    Ok(Json(json!({ "success": true })))
}

async fn dividends(State(state): State<AppState>) -> Json<DividendProjection> {
    Json(
        state
            .services
            .financial
            .dividend_projections(state.user_id, Utc::now()),
    )
}

async fn stock_price(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> ApiResult<StockPrice> {
    state
        .services
        .financial
        .stock_price(&ticker)
        .map(Json)
        .ok_or(ApiError::not_found("Stock price not found"))
}

#[derive(Debug, Deserialize)]
struct ActionQuery {
    action: Option<String>,
}

async fn trading_analysis(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
    Query(query): Query<ActionQuery>,
) -> ApiResult<TradingAnalysis> {
    let action: TradeAction = query
        .action
        .as_deref()
        .and_then(|a| a.parse().ok())
        .ok_or(ApiError::bad_request("Invalid action parameter"))?;
    Ok(Json(state.services.financial.trading_analysis(&ticker, action)))
}

async fn list_recommendations(
    State(state): State<AppState>,
) -> Json<Vec<WithCompany<AiRecommendation>>> {
    let store = &state.services.store;
    let companies = store.companies();
    Json(with_company(store.recommendations(), &companies, |r| Some(r.company_id)))
}

async fn generate_recommendations(State(state): State<AppState>) -> Result<Json<Ack>, ApiError> {
    state
        .services
        .ai
        .generate_recommendations()
        .await
        .map_err(|e| ApiError::internal("Failed to generate recommendations", e))?;
    Ok(ack("Recommendations generated successfully"))
}

async fn currency_forecast(State(state): State<AppState>) -> ApiResult<Vec<CurrencyForecast>> {
    state
        .services
        .ai
        .forecast_currency_rates()
        .map(Json)
        .map_err(|e| ApiError::internal("Failed to generate currency forecasts", e))
}

async fn currency_rates(State(state): State<AppState>) -> Json<Vec<CurrencyRateRecord>> {
    Json(state.services.store.currency_rates())
}

async fn update_rates(State(state): State<AppState>) -> Result<Json<Ack>, ApiError> {
    state
        .services
        .financial
        .update_currency_rates()
        .map_err(|e| ApiError::internal("Failed to update currency rates", e))?;
    Ok(ack("Currency rates updated successfully"))
}

async fn list_ceo_profiles(State(state): State<AppState>) -> Json<Vec<WithCompany<CeoProfile>>> {
    let store = &state.services.store;
    let companies = store.companies();
    Json(with_company(store.ceo_profiles(), &companies, |p| Some(p.company_id)))
}

async fn create_ceo_profile(
    State(state): State<AppState>,
    payload: Result<Json<CeoProfilePayload>, JsonRejection>,
) -> ApiResult<CeoProfile> {
    const INVALID: &str = "Invalid CEO profile data";
    let Json(payload) = payload.map_err(|e| ApiError::invalid(INVALID, e))?;
    let new = payload
        .validate_and_into_new()
        .map_err(|e| ApiError::invalid(INVALID, e))?;
    Ok(Json(state.services.store.create_ceo_profile(new)))
}

async fn list_alerts(State(state): State<AppState>) -> Json<Vec<MarketAlert>> {
    Json(state.services.store.active_alerts())
}

async fn create_alert(
    State(state): State<AppState>,
    payload: Result<Json<MarketAlertPayload>, JsonRejection>,
) -> ApiResult<MarketAlert> {
    const INVALID: &str = "Invalid alert data";
    let Json(payload) = payload.map_err(|e| ApiError::invalid(INVALID, e))?;
    let new = payload
        .validate_and_into_new()
        .map_err(|e| ApiError::invalid(INVALID, e))?;
    Ok(Json(state.services.ai.raise_alert(new).await))
}

async fn deactivate_alert(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    const NOT_FOUND: &str = "Alert not found";
    let id = parse_id(&id).ok_or(ApiError::not_found(NOT_FOUND))?;
    if !state.services.store.deactivate_alert(id) {
        return Err(ApiError::not_found(NOT_FOUND));
    }
    Ok(Json(json!({ "success": true })))
}

async fn monitor_market(State(state): State<AppState>) -> Result<Json<Ack>, ApiError> {
    state
        .services
        .ai
        .monitor_market_conditions()
        .await
        .map_err(|e| ApiError::internal("Failed to monitor market conditions", e))?;
    Ok(ack("Market monitoring completed"))
}

#[derive(Debug, Deserialize)]
struct NewsQuery {
    limit: Option<String>,
}

async fn list_news(
    State(state): State<AppState>,
    Query(query): Query<NewsQuery>,
) -> Json<Vec<WithCompany<NewsArticle>>> {
    let limit = query
        .limit
        .as_deref()
        .and_then(|l| l.parse::<usize>().ok())
        .filter(|l| *l > 0)
        .unwrap_or(DEFAULT_NEWS_LIMIT);

    let store = &state.services.store;
    let companies = store.companies();
    Json(with_company(store.recent_news(limit), &companies, |a| a.company_id))
}

async fn create_news(
    State(state): State<AppState>,
    payload: Result<Json<NewsArticlePayload>, JsonRejection>,
) -> ApiResult<NewsArticle> {
    const INVALID: &str = "Invalid news data";
    let Json(payload) = payload.map_err(|e| ApiError::invalid(INVALID, e))?;
    let new = payload
        .validate_and_into_new(Utc::now())
        .map_err(|e| ApiError::invalid(INVALID, e))?;
    Ok(Json(state.services.store.create_news_article(new)))
}

#[derive(Debug, Default, Deserialize)]
struct TestNotification {
    #[serde(rename = "type")]
    kind: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Serialize)]
struct TestNotificationResult {
    success: bool,
    message: &'static str,
}

async fn test_notification(
    State(state): State<AppState>,
    payload: Result<Json<TestNotification>, JsonRejection>,
) -> Json<TestNotificationResult> {
    let body = payload.map(|Json(b)| b).unwrap_or_default();
    let note = messages::portfolio_alert(
        body.kind.as_deref().unwrap_or("Test Alert"),
        body.message
            .as_deref()
            .unwrap_or("This is a test notification"),
    );
    let success = deliver(state.services.notifier.as_ref(), note).await;
    Json(TestNotificationResult {
        success,
        message: "Test notification sent",
    })
}

async fn refresh_data(State(state): State<AppState>) -> ApiResult<RefreshReport> {
    let outcome = state
        .services
        .refresh_all()
        .await
        .map_err(|e| ApiError::internal("Failed to refresh data", e))?;
    Ok(Json(outcome.report()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use fxfolio_core::notify::MemoryNotifier;
    use fxfolio_core::random::ScriptedRandom;
    use fxfolio_core::storage::Store;
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use tower::ServiceExt;

    struct Harness {
        app: Router,
        notifier: Arc<MemoryNotifier>,
    }

    fn harness() -> Harness {
        let notifier = Arc::new(MemoryNotifier::new());
        let services = Services::new(
            Arc::new(Store::seeded()),
            Arc::new(ScriptedRandom::constant(0.5)),
            notifier.clone(),
        );
        Harness {
            app: router(AppState {
                services,
                user_id: 1,
            }),
            notifier,
        }
    }

    async fn call(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = app
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, value)
    }

    #[tokio::test]
    async fn healthz_is_ok() {
        let h = harness();
        let (status, body) = call(&h.app, Method::GET, "/healthz", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::String("ok".to_string()));
    }

    #[tokio::test]
    async fn lists_seeded_companies() {
        let h = harness();
        let (status, body) = call(&h.app, Method::GET, "/api/companies", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 3);
        assert_eq!(body[0]["ticker"], "AAPL");
    }

    #[tokio::test]
    async fn invalid_company_is_rejected() {
        let h = harness();
        let (status, body) = call(
            &h.app,
            Method::POST,
            "/api/companies",
            Some(json!({ "name": "Acme" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Invalid company data" }));
    }

    #[tokio::test]
    async fn financials_update_for_unknown_company_is_404() {
        let h = harness();
        let (status, body) = call(
            &h.app,
            Method::PUT,
            "/api/companies/999/financials",
            Some(json!({ "financials": { "cashReserves": 1.0 } })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Company not found");
    }

    #[tokio::test]
    async fn position_lifecycle() {
        let h = harness();
        let (status, created) = call(
            &h.app,
            Method::POST,
            "/api/portfolio/positions",
            Some(json!({
                "companyId": 1,
                "shares": "10",
                "averageCost": "150",
                "purchaseCurrency": "USD",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["shares"], "10");
        assert_eq!(created["userId"], 1);
        let id = created["id"].as_u64().unwrap();

        let (_, summary) = call(&h.app, Method::GET, "/api/portfolio/summary", None).await;
        assert_eq!(summary["positions"].as_array().unwrap().len(), 1);
        assert!(summary["totalValueTWD"].as_f64().unwrap() > 0.0);

        let uri = format!("/api/portfolio/positions/{id}");
        let (status, updated) = call(
            &h.app,
            Method::PUT,
            &uri,
            Some(json!({ "shares": 12, "averageCost": "140.5" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["averageCost"], "140.5");

        let (status, body) = call(&h.app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true }));

        let (status, body) = call(&h.app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Position not found");
    }

    #[tokio::test]
    async fn stock_price_without_jitter() {
        let h = harness();
        let (status, body) = call(&h.app, Method::GET, "/api/stocks/AAPL/price", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["price"], 175.32);
        assert!(body["priceInTWD"].as_f64().is_some());

        let (status, body) = call(&h.app, Method::GET, "/api/stocks/MSFT/price", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Stock price not found");
    }

    #[tokio::test]
    async fn trading_analysis_requires_action() {
        let h = harness();
        let (status, body) = call(
            &h.app,
            Method::GET,
            "/api/stocks/AAPL/trading-analysis?action=HOLD",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid action parameter");

        let (status, body) = call(
            &h.app,
            Method::GET,
            "/api/stocks/AAPL/trading-analysis?action=SELL",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["recommended"], true);
    }

    #[tokio::test]
    async fn ceo_profiles_carry_their_company() {
        let h = harness();
        let (_, body) = call(&h.app, Method::GET, "/api/ceo-profiles", None).await;
        assert_eq!(body[0]["name"], "Tim Cook");
        assert_eq!(body[0]["company"]["ticker"], "AAPL");
    }

    #[tokio::test]
    async fn high_alert_notifies_and_can_be_deactivated() {
        let h = harness();
        let (status, alert) = call(
            &h.app,
            Method::POST,
            "/api/market/alerts",
            Some(json!({
                "type": "CUSTOM",
                "severity": "HIGH",
                "title": "Drawdown",
                "description": "Portfolio down 10%",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(alert["isActive"], true);
        assert_eq!(h.notifier.sent().len(), 1);

        let id = alert["id"].as_u64().unwrap();
        let uri = format!("/api/market/alerts/{id}/deactivate");
        let (status, _) = call(&h.app, Method::POST, &uri, None).await;
        assert_eq!(status, StatusCode::OK);

        let (_, active) = call(&h.app, Method::GET, "/api/market/alerts", None).await;
        assert!(active.as_array().unwrap().is_empty());

        let (status, _) = call(
            &h.app,
            Method::POST,
            "/api/market/alerts/abc/deactivate",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn news_is_enriched_and_limited() {
        let h = harness();
        for title in ["one", "two", "three"] {
            let (status, _) = call(
                &h.app,
                Method::POST,
                "/api/news",
                Some(json!({
                    "title": title,
                    "content": "c",
                    "source": "s",
                    "companyId": 2,
                    "sentiment": "POSITIVE",
                })),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }

        let (_, body) = call(&h.app, Method::GET, "/api/news?limit=2", None).await;
        assert_eq!(body.as_array().unwrap().len(), 2);
        assert_eq!(body[0]["company"]["ticker"], "TSLA");

        let (_, body) = call(&h.app, Method::GET, "/api/news?limit=abc", None).await;
        assert_eq!(body.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_notification_uses_defaults() {
        let h = harness();
        let (status, body) = call(&h.app, Method::POST, "/api/notifications/test", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(h.notifier.sent()[0].subject, "Test Alert");
    }

    #[tokio::test]
    async fn refresh_reports_success() {
        let h = harness();
        let (status, body) = call(&h.app, Method::POST, "/api/data/refresh", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "All data refreshed successfully");

        let (_, forecasts) = call(&h.app, Method::GET, "/api/ai/currency-forecast", None).await;
        assert_eq!(forecasts.as_array().unwrap().len(), 3);
        assert!(forecasts[0]["predicted24h"].as_f64().is_some());
    }
}
