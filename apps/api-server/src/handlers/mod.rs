//! HTTP handlers and route configuration.

mod health;
mod posts;

use actix_web::{HttpRequest, HttpResponse, web};

use crate::middleware::error::{AppError, AppResult, json_error_handler};

/// JSON extractor settings shared by every route.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

async fn unmatched_route(req: HttpRequest) -> AppResult<HttpResponse> {
    Err(AppError::NotFound(format!("No route for {}", req.path())))
}

async fn method_not_allowed(req: HttpRequest) -> AppResult<HttpResponse> {
    Err(AppError::MethodNotAllowed(req.method().to_string()))
}

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/posts")
                .service(
                    web::resource("")
                        .route(web::get().to(posts::list_posts))
                        .route(web::post().to(posts::create_post))
                        .default_service(web::route().to(method_not_allowed)),
                )
                .service(
                    web::resource("/{id}")
                        .route(web::get().to(posts::get_post))
                        .route(web::put().to(posts::update_post))
                        .route(web::delete().to(posts::delete_post))
                        .default_service(web::route().to(method_not_allowed)),
                ),
        )
        .default_service(web::route().to(unmatched_route));
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test};

    use blog_infra::InMemoryPostRepository;
    use blog_shared::ErrorResponse;

    use super::*;
    use crate::state::AppState;

    macro_rules! app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(AppState::with_repository(
                        Arc::new(InMemoryPostRepository::new()),
                        "memory",
                    )))
                    .configure(configure_routes),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_unknown_route_is_json_not_found() {
        let app = app!();

        for uri in ["/nope", "/posts/a/b"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let res = test::call_service(&app, req).await;
            assert_eq!(res.status(), StatusCode::NOT_FOUND, "{uri}");

            let body: ErrorResponse = test::read_body_json(res).await;
            assert_eq!(body.message, format!("No route for {uri}"));
        }
    }

    #[actix_web::test]
    async fn test_wrong_method_is_json_method_not_allowed() {
        let app = app!();

        let req = test::TestRequest::patch().uri("/posts").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
        let body: ErrorResponse = test::read_body_json(res).await;
        assert_eq!(body.message, "Method PATCH not allowed");

        let req = test::TestRequest::post().uri("/posts/abc").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
        let body: ErrorResponse = test::read_body_json(res).await;
        assert_eq!(body.message, "Method POST not allowed");
    }
}
