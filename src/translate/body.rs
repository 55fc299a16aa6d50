//! Request body buffering

use bytes::{Bytes, BytesMut};
use http_body_util::BodyExt;
use hyper::body::Body;

use crate::error::{BoxError, InvocationError};

/// Collect every data frame of `body` into one buffer.
///
/// Returns `None` when the body produced no data frames, so "no body" stays
/// distinguishable from an empty one. A body error discards whatever was
/// buffered so far.
pub async fn buffer_body<B>(mut body: B) -> Result<Option<Bytes>, InvocationError>
where
    B: Body<Data = Bytes> + Unpin,
    B::Error: Into<BoxError>,
{
    let mut buffer: Option<BytesMut> = None;

    while let Some(frame) = body.frame().await {
        let frame = frame.map_err(|e| InvocationError::Transport(e.into()))?;
        // Trailers carry no payload
        if let Ok(chunk) = frame.into_data() {
            buffer
                .get_or_insert_with(BytesMut::new)
                .extend_from_slice(&chunk);
        }
    }

    Ok(buffer.map(BytesMut::freeze))
}
