//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the solve endpoint, the health probes, the request
//! and response bodies, and the error envelope. Domain types stay free of
//! utoipa derives; the wrappers in `inbound::http::schemas` describe them.
//!
//! The document backs Swagger UI in debug builds and is exported by
//! `cargo run --bin openapi-dump`.

use crate::inbound::http::health::ProbeBody;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::solve::{SolveHomeworkRequestBody, SolveHomeworkResponseBody};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Register the bearer-token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerAuth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Access token issued by the identity provider."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Homework solver API",
        description = "Solves homework questions with an LLM tutor and records each solved session.",
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        crate::inbound::http::solve::solve_homework,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        SolveHomeworkRequestBody,
        SolveHomeworkResponseBody,
        ErrorSchema,
        ErrorCodeSchema,
        ProbeBody
    )),
    tags(
        (name = "homework", description = "Homework solving"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated document's structure.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("ErrorEnvelope", &["error", "code", "traceId"])]
    #[case("SolveHomeworkRequestBody", &["questionText", "imageUrl"])]
    #[case("SolveHomeworkResponseBody", &["solution", "sessionId"])]
    #[case("ProbeBody", &["status"])]
    fn schemas_expose_wire_field_names(#[case] name: &str, #[case] fields: &[&str]) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas
            .get(name)
            .unwrap_or_else(|| panic!("{name} schema"));
        for field in fields {
            assert_object_schema_has_field(schema, field);
        }
    }

    #[rstest]
    fn solve_endpoint_is_documented_as_post() {
        let doc = ApiDoc::openapi();
        let item = doc
            .paths
            .paths
            .get("/api/v1/solve-homework")
            .expect("solve path");
        let operation = item.post.as_ref().expect("POST operation");
        assert_eq!(operation.operation_id.as_deref(), Some("solveHomework"));
    }

    #[rstest]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.as_ref().expect("components");
        assert!(matches!(
            components.security_schemes.get("BearerAuth"),
            Some(SecurityScheme::Http(_))
        ));
    }

    #[rstest]
    fn probes_are_documented() {
        let doc = ApiDoc::openapi();
        for path in ["/health/ready", "/health/live"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
