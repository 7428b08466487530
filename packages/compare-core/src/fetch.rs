//! Two-stage starship fetch, expressed as a [`Procedure`].
//!
//! Stage 1 issues the request and suspends until a response object exists.
//! Stage 2 decodes the body and suspends until decoding finishes. Failures
//! at either suspension point are not recovered here.

use std::sync::Arc;

use swapi_client::{starship_url, Result, ShipId, Starship, SwapiError, Transport};
use tracing::debug;

use crate::runner::{run, Procedure, ProcedureStep, Step};

/// Values the fetch procedure is resumed with, one variant per stage.
pub enum FetchValue<R> {
    Response(R),
    Body(Starship),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchStage {
    NotStarted,
    AwaitingResponse,
    AwaitingBody,
    Finished,
}

/// Fetch procedure for a single starship.
pub struct FetchStarship<T: Transport> {
    transport: Arc<T>,
    id: ShipId,
    url: String,
    stage: FetchStage,
}

impl<T: Transport> FetchStarship<T> {
    pub fn new(transport: Arc<T>, api_root: &str, id: ShipId) -> Self {
        Self {
            transport,
            id,
            url: starship_url(api_root, id),
            stage: FetchStage::NotStarted,
        }
    }
}

impl<T: Transport> Procedure for FetchStarship<T> {
    type Value = FetchValue<T::Response>;
    type Output = Starship;
    type Error = SwapiError;

    fn start(&mut self) -> Result<ProcedureStep<Self>> {
        debug!(ship_id = %self.id, url = %self.url, "Requesting starship");
        self.stage = FetchStage::AwaitingResponse;

        let transport = self.transport.clone();
        let url = self.url.clone();
        Ok(Step::pending(async move {
            transport.get(&url).await.map(FetchValue::Response)
        }))
    }

    fn resume(&mut self, settled: Result<Self::Value>) -> Result<ProcedureStep<Self>> {
        let stage = std::mem::replace(&mut self.stage, FetchStage::Finished);
        let value = settled?;

        match (stage, value) {
            (FetchStage::AwaitingResponse, FetchValue::Response(response)) => {
                self.stage = FetchStage::AwaitingBody;
                let transport = self.transport.clone();
                Ok(Step::pending(async move {
                    transport.decode(response).await.map(FetchValue::Body)
                }))
            }
            (FetchStage::AwaitingBody, FetchValue::Body(ship)) => {
                debug!(ship_id = %self.id, name = ship.name(), "Starship decoded");
                Ok(Step::Done(ship))
            }
            (stage, _) => Err(SwapiError::Protocol(format!(
                "starship {} resumed with an unexpected value while {:?}",
                self.id, stage
            ))),
        }
    }
}

/// Fetch and decode one starship through the sequence runner.
pub async fn fetch_starship<T: Transport>(
    transport: Arc<T>,
    api_root: &str,
    id: ShipId,
) -> Result<Starship> {
    run(FetchStarship::new(transport, api_root, id)).await
}
