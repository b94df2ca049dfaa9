//! Admin stylesheet and editor script, embedded at compile time.

use axum::{
    body::Body,
    extract::Path,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use include_dir::{Dir, include_dir};
use mime_guess::Mime;

use crate::application::error::ErrorReport;

static ADMIN_ASSETS: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/static/admin");

const SOURCE: &str = "infra::assets::serve_admin";

/// Serve an embedded admin asset such as `app.css` or `editor.js`.
pub async fn serve_admin(path: Option<Path<String>>) -> Response {
    let requested = path.map(|Path(value)| value).unwrap_or_default();
    match lookup(&ADMIN_ASSETS, &requested) {
        Some((contents, mime)) => asset_response(Bytes::from_static(contents), mime),
        None => {
            let mut response = StatusCode::NOT_FOUND.into_response();
            ErrorReport::from_message(
                SOURCE,
                StatusCode::NOT_FOUND,
                format!("admin asset `{requested}` not found"),
            )
            .attach(&mut response);
            response
        }
    }
}

fn lookup(bundle: &'static Dir<'static>, requested: &str) -> Option<(&'static [u8], Mime)> {
    let candidate = requested.trim_start_matches('/');
    if candidate.is_empty() || candidate.ends_with('/') || candidate.contains("..") {
        return None;
    }

    let file = bundle.get_file(candidate)?;
    let mime = mime_guess::from_path(candidate).first_or_octet_stream();
    Some((file.contents(), mime))
}

fn asset_response(bytes: Bytes, mime: Mime) -> Response {
    let len = bytes.len();
    let mut response = Response::new(Body::from(bytes));

    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(mime.as_ref()) {
        headers.insert(header::CONTENT_TYPE, value);
    }
    if let Ok(value) = HeaderValue::from_str(&len.to_string()) {
        headers.insert(header::CONTENT_LENGTH, value);
    }
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("public, max-age=3600"),
    );

    response
}
