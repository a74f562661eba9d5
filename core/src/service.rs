//! # Territory Router
//!
//! Classifies the postcode of a submission, dispatches to the matching resolver
//! and normalises its territory-specific answer into a [`RentControlMatch`].

use std::sync::Arc;

use encadre_common::category::{BuildingType, RegulationCategory};
use encadre_common::config::Config;
use encadre_common::error::LookupError;
use encadre_common::geo::GeoPoint;
use encadre_common::lookup::{MatchedCategory, RentControlMatch};
use encadre_common::territory::Territory;
use tracing::{info, warn};

use crate::resolver::{
    EstEnsembleDataset, EstEnsembleMatch, EstEnsembleResolver, ParisMatch, ParisResolver,
};
use crate::transport::DatasetTransport;
use crate::vocabulary;

/// One user submission, as handed over by the address provider and the form.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupRequest {
    pub point: GeoPoint,
    pub postcode: String,
    pub category: RegulationCategory,
}

pub struct RentControlService {
    paris: ParisResolver,
    est_ensemble: EstEnsembleResolver,
    dataset: Arc<EstEnsembleDataset>,
}

impl RentControlService {
    /// `dataset` is the Est Ensemble cache; share one instance per process.
    pub fn new(
        transport: Arc<dyn DatasetTransport>,
        config: &Config,
        dataset: Arc<EstEnsembleDataset>,
    ) -> Result<Self, url::ParseError> {
        Ok(Self {
            paris: ParisResolver::new(transport.clone(), &config.paris)?,
            est_ensemble: EstEnsembleResolver::new(transport, &config.est_ensemble)?,
            dataset,
        })
    }

    /// Looks up the rent-control rates for one submission.
    ///
    /// Unsupported postcodes fail before any request is made.
    pub async fn lookup(&self, request: &LookupRequest) -> Result<RentControlMatch, LookupError> {
        let Some(territory) = Territory::from_postcode(&request.postcode) else {
            warn!("Postcode {} is not covered", request.postcode);
            return Err(LookupError::UnsupportedTerritory {
                postcode: request.postcode.clone(),
            });
        };
        info!("Territory for {}: {}", request.postcode, territory.label());

        let found: Option<RentControlMatch> = match territory {
            Territory::Paris => self
                .paris
                .resolve(&request.point, &request.category)
                .await?
                .map(RentControlMatch::from),
            Territory::EstEnsemble => self
                .est_ensemble
                .resolve(&self.dataset, &request.point, &request.category)
                .await?
                .map(RentControlMatch::from),
        };

        let found = found.ok_or(LookupError::NoData { territory })?;
        if found.quality.is_degraded() {
            warn!("Degraded match for {}: {:?}", found.zone_name, found.quality);
        }
        Ok(found)
    }
}

impl From<ParisMatch> for RentControlMatch {
    fn from(m: ParisMatch) -> Self {
        RentControlMatch {
            territory: Territory::Paris,
            zone_name: m.quartier,
            schedule: m.schedule,
            reference_year: m.annee,
            category: MatchedCategory {
                room_count: m.piece,
                construction_period: m.epoque,
                furnished: m.meuble_txt,
                building_type: None,
            },
            quality: m.quality,
        }
    }
}

impl From<EstEnsembleMatch> for RentControlMatch {
    fn from(m: EstEnsembleMatch) -> Self {
        RentControlMatch {
            territory: Territory::EstEnsemble,
            zone_name: m.zone_name,
            schedule: m.schedule,
            reference_year: m.reference_year,
            category: MatchedCategory {
                room_count: m.piece.to_string(),
                construction_period: m.annee_de_construction,
                furnished: vocabulary::paris::meuble_txt(m.meuble).to_string(),
                building_type: Some(if m.maison {
                    BuildingType::House
                } else {
                    BuildingType::Apartment
                }),
            },
            quality: m.quality,
        }
    }
}
