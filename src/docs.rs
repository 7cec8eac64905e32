use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use pustaka_models::{
    AuthResponse, Buku, BukuRequest, LoginRequest, RegisterRequest, User, UserWithRole,
};

use crate::modules::auth::controller::{ErrorResponse, ValidationErrorResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::logout,
        crate::modules::auth::controller::me,
        crate::modules::buku::controller::list_buku,
        crate::modules::buku::controller::get_buku,
        crate::modules::buku::controller::create_buku,
        crate::modules::buku::controller::update_buku,
        crate::modules::buku::controller::delete_buku,
        crate::router::health,
    ),
    components(
        schemas(
            User,
            UserWithRole,
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            Buku,
            BukuRequest,
            ErrorResponse,
            ValidationErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and token management"),
        (name = "Buku", description = "Book records, readable by every role"),
        (name = "Health", description = "Service liveness")
    ),
    info(
        title = "Pustaka API",
        version = "0.1.0",
        description = "Book catalogue REST API with admin, editor and viewer roles.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for path in [
            "/api/register",
            "/api/login",
            "/api/logout",
            "/api/me",
            "/api/buku",
            "/api/buku/{id}",
            "/health",
        ] {
            assert!(paths.contains(&path), "missing {}", path);
        }
    }

    #[test]
    fn test_bearer_scheme_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
