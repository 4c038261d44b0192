//! Custom extractors: the caller's address, plus JSON bodies and query
//! strings whose rejections use the API error envelope.

use std::net::{IpAddr, SocketAddr};

use ambassadors_core::error::CoreError;
use axum::extract::{ConnectInfo, FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::Json;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Resolve the client address for rate limiting and vote deduplication.
///
/// Uses the first `X-Forwarded-For` entry, then `X-Real-IP`, then the peer
/// address of the connection. Header values that do not parse as an IP
/// address are ignored.
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> Option<String> {
    let forwarded = header_value(headers, "x-forwarded-for")
        .and_then(|value| value.split(',').next())
        .and_then(parse_ip);

    forwarded
        .or_else(|| header_value(headers, "x-real-ip").and_then(parse_ip))
        .or_else(|| peer.map(|addr| addr.ip()))
        .map(|ip| ip.to_string())
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn parse_ip(raw: &str) -> Option<IpAddr> {
    raw.trim().parse().ok()
}

/// Peer address recorded by `into_make_service_with_connect_info`, if any.
pub fn peer_addr(extensions: &axum::http::Extensions) -> Option<SocketAddr> {
    extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr)
}

/// The resolved client address. Rejects the request with
/// `UNKNOWN_CLIENT_IP` when no address can be determined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIp(pub String);

impl<S: Send + Sync> FromRequestParts<S> for ClientIp {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        client_ip(&parts.headers, peer_addr(&parts.extensions))
            .map(ClientIp)
            .ok_or_else(|| AppError::BadRequest {
                code: "UNKNOWN_CLIENT_IP",
                message: "Unable to determine client address".into(),
            })
    }
}

/// `Json<T>` whose rejection is a validation error on `body`.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(CoreError::invalid("body", rejection.body_text()).into()),
        }
    }
}

/// `Query<T>` whose rejection is a validation error on `query`.
#[derive(Debug)]
pub struct QueryParams<T>(pub T);

impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(QueryParams(value)),
            Err(rejection) => Err(CoreError::invalid("query", rejection.body_text()).into()),
        }
    }
}
