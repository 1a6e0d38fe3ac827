use actix_web::{http::header::ContentType, web, HttpResponse, Responder};
use tracing::{debug, error, info, instrument, warn};

use crate::api::models::{
    ErrorResponse, GenerateRequest, GenerateResponse, HealthStatus, ScanForm, SearchRequest,
    SearchResponse,
};
use crate::api::ApiState;
use crate::qr;
use crate::url_generator::{self, combination_count};

/// Plain-text reply when the form is submitted without a URL
pub const EMPTY_DATA_MESSAGE: &str = "Empty Data!";

/// Plain-text reply when the URL cannot be encoded
pub const QR_ERROR_MESSAGE: &str = "Error occurred";

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok().content_type(ContentType::html()).body(body)
}

fn render_failure(e: anyhow::Error) -> HttpResponse {
    error!("Failed to render page: {:#}", e);
    HttpResponse::InternalServerError()
        .content_type(ContentType::plaintext())
        .body("Failed to render page")
}

/// Index page with the URL form
#[instrument(skip(state))]
pub async fn index(state: web::Data<ApiState>) -> impl Responder {
    debug!("Rendering index page");
    match state.renderer.render_index() {
        Ok(body) => html(body),
        Err(e) => render_failure(e),
    }
}

/// HTTP handler for the QR form
///
/// Encodes the submitted URL as a QR code and renders it into the scan page.
/// An empty URL or a failed encoding is answered with a plain-text message.
///
/// # Arguments
/// * `form` - Form data containing the URL
/// * `state` - Shared configuration and page renderer
///
/// # Returns
/// * HTML page with the QR code, or a plain-text error message
#[instrument(skip(state), fields(url = %form.url))]
pub async fn scan(form: web::Form<ScanForm>, state: web::Data<ApiState>) -> impl Responder {
    let url = form.url.trim();
    if url.is_empty() {
        warn!("Rejected scan request without a URL");
        return HttpResponse::Ok()
            .content_type(ContentType::plaintext())
            .body(EMPTY_DATA_MESSAGE);
    }

    info!("Encoding QR code for URL: {}", url);
    let src = match qr::to_data_url(url, state.config.qr_min_dimension) {
        Ok(src) => src,
        Err(e) => {
            error!("QR encoding failed for {}: {:#}", url, e);
            return HttpResponse::Ok()
                .content_type(ContentType::plaintext())
                .body(QR_ERROR_MESSAGE);
        }
    };

    match state.renderer.render_scan(&src, url) {
        Ok(body) => html(body),
        Err(e) => render_failure(e),
    }
}

/// Confirmation page
#[instrument(skip(state))]
pub async fn success(state: web::Data<ApiState>) -> impl Responder {
    match state.renderer.render_success() {
        Ok(body) => html(body),
        Err(e) => render_failure(e),
    }
}

/// HTTP handler for campaign URL generation
///
/// Expands the base URL and parameters into every combination, optionally
/// with a QR code per URL. Requests that would expand past the configured
/// limits are rejected before any URL is built. QR codes are encoded on the
/// blocking thread pool.
///
/// # Arguments
/// * `request` - JSON body with url, params, optional slug and qr flag
/// * `state` - Shared configuration
///
/// # Returns
/// * JSON list of URLs, or a JSON error
#[instrument(skip_all, fields(url = %request.options.url))]
pub async fn generate(request: web::Json<GenerateRequest>, state: web::Data<ApiState>) -> impl Responder {
    let GenerateRequest { options, qr: with_qr } = request.into_inner();
    info!("Received generate request for {} parameter(s)", options.params.len());

    let limit = if with_qr {
        state.config.max_qr_codes.min(state.config.max_combinations)
    } else {
        state.config.max_combinations
    };
    match combination_count(&options.params) {
        Some(count) if count <= limit => {
            debug!("Request expands to {} URL(s)", count);
        }
        _ => {
            warn!("Rejected generate request exceeding {} combinations (qr={})", limit, with_qr);
            return HttpResponse::PayloadTooLarge().json(ErrorResponse::new(format!(
                "Request expands to more than {} {}",
                limit,
                if with_qr { "QR codes" } else { "URLs" }
            )));
        }
    }

    let urls = match url_generator::create(options).await {
        Ok(urls) => urls,
        Err(e) => {
            warn!("Rejected generate request: {:#}", e);
            return HttpResponse::BadRequest().json(ErrorResponse::new(e.to_string()));
        }
    };

    let (urls, qr_codes) = if with_qr {
        let min_dimension = state.config.qr_min_dimension;
        let blocked = web::block(move || {
            let encoded: anyhow::Result<Vec<String>> = urls
                .iter()
                .map(|url| qr::to_data_url(url, min_dimension))
                .collect();
            (urls, encoded)
        })
        .await;

        match blocked {
            Ok((urls, Ok(codes))) => (urls, Some(codes)),
            Ok((_, Err(e))) => {
                error!("QR encoding failed: {:#}", e);
                return HttpResponse::UnprocessableEntity().json(ErrorResponse::new(e.to_string()));
            }
            Err(e) => {
                error!("QR encoding task failed: {}", e);
                return HttpResponse::InternalServerError()
                    .json(ErrorResponse::new("QR encoding task failed"));
            }
        }
    } else {
        (urls, None)
    };

    info!("Generated {} URL(s)", urls.len());
    HttpResponse::Ok().json(GenerateResponse {
        status: "success".to_string(),
        count: urls.len(),
        urls,
        qr_codes,
    })
}

/// HTTP handler for query-string generation
#[instrument(skip_all)]
pub async fn search(request: web::Json<SearchRequest>, state: web::Data<ApiState>) -> impl Responder {
    let SearchRequest { params } = request.into_inner();
    info!("Received search request for {} parameter(s)", params.len());

    let limit = state.config.max_combinations;
    if !matches!(combination_count(&params), Some(count) if count <= limit) {
        warn!("Rejected search request exceeding {} combinations", limit);
        return HttpResponse::PayloadTooLarge().json(ErrorResponse::new(format!(
            "Request expands to more than {} query strings",
            limit
        )));
    }

    match url_generator::search(params).await {
        Ok(queries) => HttpResponse::Ok().json(SearchResponse {
            status: "success".to_string(),
            count: queries.len(),
            queries,
        }),
        Err(e) => {
            warn!("Rejected search request: {:#}", e);
            HttpResponse::BadRequest().json(ErrorResponse::new(e.to_string()))
        }
    }
}

/// Health check endpoint for monitoring service status
#[instrument(skip(state))]
pub async fn health_check(state: web::Data<ApiState>) -> impl Responder {
    let uptime = state.started.elapsed();
    debug!("Health check: uptime={:?}", uptime);
    HttpResponse::Ok().json(HealthStatus {
        status: "healthy".to_string(),
        uptime_secs: uptime.as_secs(),
    })
}
