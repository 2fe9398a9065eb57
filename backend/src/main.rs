use moon::actix_web::http::header;
use moon::actix_web::{HttpRequest, HttpResponse, web};
use moon::*;
use shared::{SiteConfig, negotiate_language, redirect_location};

// ===== CENTRALIZED DEBUG FLAGS =====
const DEBUG_PAGES: bool = false; // Localized page serving

macro_rules! debug_log {
    ($flag:expr, $($arg:tt)*) => {
        if $flag {
            println!($($arg)*);
        }
    };
}

async fn frontend() -> Frontend {
    Frontend::new().title("Portfolio")
}

/// The page controllers talk plain HTTP, no up messages are expected.
async fn up_msg_handler(_req: UpMsgRequest<()>) {}

/// Front controller: `303` to the page matching the visitor's language.
async fn language_redirect(req: HttpRequest, config: web::Data<SiteConfig>) -> HttpResponse {
    let accept_language = req
        .headers()
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok());
    let lang = negotiate_language(accept_language, &config.languages.supported, &config.languages.default);
    let location = redirect_location(lang);

    println!("🌐 Redirecting {:?} to {location}", accept_language.unwrap_or("-"));
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Accepts the contact form. Any response counts as delivered for the page,
/// so this only acknowledges what arrived.
async fn receive_submission(req: HttpRequest, body: web::Bytes) -> HttpResponse {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");
    println!("📨 Contact form submission: {} bytes ({content_type})", body.len());
    HttpResponse::Ok().finish()
}

async fn localized_page(lang: web::Path<String>, config: web::Data<SiteConfig>) -> HttpResponse {
    let lang = lang.into_inner();
    let Some(path) = backend::localized_page_path(&config, &lang) else {
        return HttpResponse::NotFound().finish();
    };

    match tokio::fs::read_to_string(&path).await {
        Ok(page) => {
            debug_log!(DEBUG_PAGES, "📄 Serving {}", path.display());
            HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(page)
        }
        Err(error) => {
            eprintln!("🚨 Page {} unavailable: {error}, run generate_site first", path.display());
            HttpResponse::NotFound().finish()
        }
    }
}

/// Site routes next to moon's own `/_api` endpoints.
fn site_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(language_redirect))
        .route("/index.php", web::get().to(language_redirect))
        .route("/submit.php", web::post().to(receive_submission))
        .route("/{lang}/index.html", web::get().to(localized_page));
}

#[moon::main]
async fn main() -> std::io::Result<()> {
    std::panic::set_hook(Box::new(|panic_info| {
        println!("BACKEND PANIC: {:?}", panic_info);
    }));

    let config = backend::load_site_config().map_err(std::io::Error::other)?;
    println!(
        "⚙️ Serving languages {:?} (default {}) from {}",
        config.languages.supported, config.languages.default, config.generator.output_dir
    );

    start(frontend, up_msg_handler, move |cfg| {
        cfg.app_data(web::Data::new(config.clone())).configure(site_routes);
    })
    .await
}
