use bytes::{Bytes, BytesMut};
use reqwest::Response;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BodyError {
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// `received` is a lower bound when the body was streamed.
    #[error("body exceeds {limit} bytes")]
    TooLarge { limit: u64, received: u64 },
}

/// Buffer a response body, giving up once more than `limit` bytes arrive.
///
/// The cap applies to the decoded body, so compressed or chunked
/// responses without a usable `Content-Length` are bounded too.
pub async fn read_capped(mut response: Response, limit: u64) -> Result<Bytes, BodyError> {
    if let Some(declared) = response.content_length()
        && declared > limit
    {
        return Err(BodyError::TooLarge {
            limit,
            received: declared,
        });
    }

    let mut body = BytesMut::new();
    while let Some(chunk) = response.chunk().await? {
        let received = (body.len() + chunk.len()) as u64;
        if received > limit {
            return Err(BodyError::TooLarge { limit, received });
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body.freeze())
}
