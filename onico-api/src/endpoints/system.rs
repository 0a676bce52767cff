use super::{Ignored, Method, NoData, Request};
use crate::error::ApiError;
use std::borrow::Cow;

/// Ask the backend to drop its server-side caches.
#[derive(Default, Debug, Clone)]
pub struct InvalidateCache;

impl Request for InvalidateCache {
    type Data = NoData;
    type Response = Ignored;
    type Output = ();
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/cache/invalidate".into()
    }

    fn output(_: Option<Self::Response>) -> Result<Self::Output, ApiError> {
        Ok(())
    }
}
