use axum::{
    extract::{MatchedPath, Request},
    http::header,
    middleware::Next,
    response::IntoResponse,
};

/// Route templates that serve HTML dashboards rather than JSON. Matching on
/// the template keeps ids such as `status` from changing the policy.
fn is_html_route(template: &str) -> bool {
    template == "/dashboard"
        || template == "/dashboard/:user_id"
        || template.ends_with("/status/:status_id")
}

pub async fn security_headers_middleware(req: Request, next: Next) -> impl IntoResponse {
    let html_route = req
        .extensions()
        .get::<MatchedPath>()
        .is_some_and(|matched| is_html_route(matched.as_str()));

    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        header::HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        header::X_XSS_PROTECTION,
        header::HeaderValue::from_static("1; mode=block"),
    );
    headers.insert(
        header::STRICT_TRANSPORT_SECURITY,
        header::HeaderValue::from_static("max-age=31536000; includeSubDomains"),
    );

    if html_route {
        // Dashboards ship inline styles and scripts and may pull chart assets over https.
        headers.insert(
            header::CONTENT_SECURITY_POLICY,
            header::HeaderValue::from_static(
                "default-src 'self'; \
                 script-src 'self' 'unsafe-inline' https:; \
                 style-src 'self' 'unsafe-inline' https:; \
                 img-src 'self' data: https:; \
                 font-src 'self' https:; \
                 connect-src 'self'",
            ),
        );
        headers.insert(
            header::X_FRAME_OPTIONS,
            header::HeaderValue::from_static("SAMEORIGIN"),
        );
    } else {
        headers.insert(
            header::CONTENT_SECURITY_POLICY,
            header::HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'"),
        );
        headers.insert(
            header::X_FRAME_OPTIONS,
            header::HeaderValue::from_static("DENY"),
        );
    }

    response
}
