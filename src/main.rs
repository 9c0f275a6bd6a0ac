//! ReLief 백엔드 메인 애플리케이션
//!
//! 외부 연동 클라이언트를 초기화해 서비스 레지스트리에 등록하고,
//! Actix-web HTTP 서버를 구동합니다.

use std::io;
use std::sync::Arc;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, App, HttpServer};
use actix_governor::{Governor, GovernorConfigBuilder};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};
use relief_backend::caching::redis::RedisClient;
use relief_backend::clients::{ClerkClient, GeminiClient, ResendClient};
use relief_backend::config::{CorsConfig, Environment, RateLimitConfig, ServerConfig};
use relief_backend::core::errors::AppError;
use relief_backend::core::registry::ServiceLocator;
use relief_backend::db::SupabaseClient;
use relief_backend::routes::configure_all_routes;
use relief_backend::utils::display_terminal::print_integration_status;

#[actix_web::main]
async fn main() -> io::Result<()> {
    load_env_file();
    init_logging();

    info!("🌱 ReLief 백엔드 시작중... ({:?})", Environment::current());

    initialize_integrations().await.map_err(startup_error)?;

    ServiceLocator::initialize_all()
        .await
        .map_err(|e| io::Error::other(format!("서비스 초기화 실패: {}", e)))?;

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server().await
}

fn startup_error(e: AppError) -> io::Error {
    error!("❌ 시작 실패: {}", e);
    io::Error::other(e.to_string())
}

/// HTTP 서버를 구성하고 실행합니다
///
/// 미들웨어 순서: Rate Limiting → CORS → 요청 로그 → 경로 정규화
async fn start_http_server() -> io::Result<()> {
    let bind_address = ServerConfig::bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);

    let per_second = RateLimitConfig::per_second();
    let burst_size = RateLimitConfig::burst_size();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(per_second)
        .burst_size(burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| io::Error::other("Rate Limiting 설정이 올바르지 않습니다"))?;

    info!("🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개", per_second, burst_size);

    let allowed_origins = CorsConfig::allowed_origins();

    HttpServer::new(move || {
        App::new()
            .wrap(Governor::new(&governor_conf))
            .wrap(configure_cors(&allowed_origins))
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_all_routes)
    })
        .bind(bind_address)?
        .workers(ServerConfig::workers())
        .run()
        .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    let loaded = match profile.as_str() {
        "prod" => dotenv::from_filename(".env.prod").map(|_| ".env.prod"),
        "dev" => dotenv::from_filename(".env.dev").map(|_| ".env.dev"),
        _ => dotenv().map(|_| ".env"),
    };

    // 로거 초기화 전이므로 stderr로 출력
    match loaded {
        Ok(file) => eprintln!("{} 파일 로드 됨 (PROFILE={})", file, profile),
        Err(e) => eprintln!("환경 파일 로드 실패 (PROFILE={}): {}", profile, e),
    }
}

/// 로깅 시스템을 초기화합니다
///
/// ```bash
/// RUST_LOG=debug cargo run
/// RUST_LOG=relief_backend::services=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}

/// 외부 연동 클라이언트를 만들어 `ServiceLocator`에 등록합니다
///
/// Supabase, Clerk, Resend, Gemini 설정이 없으면 시작을 중단합니다.
/// Redis는 보조 캐시이므로 연결에 실패해도 비활성 모드로 계속 진행합니다.
async fn initialize_integrations() -> Result<(), AppError> {
    info!("📡 외부 연동 초기화 중...");

    let supabase = SupabaseClient::new()?;
    supabase.ping().await?;
    print_integration_status("Supabase", true, supabase.rest_url());

    let redis = RedisClient::connect_or_disabled().await;
    print_integration_status(
        "Redis",
        redis.is_available(),
        if redis.is_available() { "connected" } else { "disabled (cache bypass)" },
    );

    let clerk = ClerkClient::new()?;
    print_integration_status("Clerk", true, "session JWT + webhooks");

    let resend = ResendClient::new()?;
    print_integration_status("Resend", true, "transactional email");

    let gemini = GeminiClient::new()?;
    print_integration_status("Gemini", true, gemini.embedding_model());

    ServiceLocator::set(Arc::new(supabase));
    ServiceLocator::set(Arc::new(redis));
    ServiceLocator::set(Arc::new(clerk));
    ServiceLocator::set(Arc::new(resend));
    ServiceLocator::set(Arc::new(gemini));

    Ok(())
}

/// CORS 설정을 구성합니다
///
/// 허용 오리진은 `CORS_ALLOWED_ORIGINS`에서 읽습니다.
fn configure_cors(allowed_origins: &[String]) -> Cors {
    allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        .max_age(3600)
}
