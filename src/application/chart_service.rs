// Cases chart service - Use case for building a cases/deaths chart
use crate::application::case_repository::{CaseRepository, RecordQuery, RecordScope, TopQuery};
use crate::application::chart_request::CasesChartRequest;
use crate::application::jurisdiction_directory::JurisdictionDirectory;
use crate::domain::chart::{CasesChart, ChartAssembler, ChartOptions};
use crate::domain::chart_type::Metric;
use crate::domain::error::ChartError;
use crate::domain::jurisdiction::{Jurisdiction, JurisdictionId};
use crate::domain::record::CaseRecord;
use crate::domain::series::SeriesBuilder;
use crate::infrastructure::config::ChartSettings;
use std::sync::Arc;

/// Which records a chart is built from, and which series they land in.
#[derive(Debug, Clone)]
enum Selection {
    /// All countries summed into one series.
    Global,
    /// One series per jurisdiction.
    Separate {
        jurisdictions: Vec<Arc<Jurisdiction>>,
        exclude: Vec<JurisdictionId>,
    },
    /// Selected regions summed into their country's series.
    Rollup {
        country: Arc<Jurisdiction>,
        regions: Vec<Arc<Jurisdiction>>,
    },
}

#[derive(Clone)]
pub struct CasesChartService {
    repository: Arc<dyn CaseRepository>,
    directory: Arc<dyn JurisdictionDirectory>,
    settings: ChartSettings,
}

impl CasesChartService {
    pub fn new(
        repository: Arc<dyn CaseRepository>,
        directory: Arc<dyn JurisdictionDirectory>,
        settings: ChartSettings,
    ) -> Self {
        Self {
            repository,
            directory,
            settings,
        }
    }

    pub async fn cases_chart(&self, request: &CasesChartRequest) -> Result<CasesChart, ChartError> {
        // Chart types are validated before anything is fetched
        let options = request.options()?;
        let selection = self.select(request, &options).await?;
        let records = self.fetch(&selection).await?;
        tracing::debug!(
            records = records.len(),
            cases = %options.confirmed,
            deaths = %options.deceased,
            "building cases chart"
        );

        let mut builder = SeriesBuilder::new();
        builder.extend(&records);
        let set = builder.finish()?;

        let chart = ChartAssembler::new(options)
            .with_world_population(self.settings.world_population)
            .with_regression_degree(self.settings.regression_degree)
            .assemble(set);
        Ok(chart)
    }

    async fn select(&self, request: &CasesChartRequest, options: &ChartOptions) -> Result<Selection, ChartError> {
        let countries = request
            .countries()
            .into_iter()
            .take(self.settings.max_jurisdictions)
            .map(|name| {
                self.directory
                    .resolve(name)
                    .ok_or_else(|| ChartError::UnresolvedReference(name.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        match countries.as_slice() {
            [] if request.global() => Ok(Selection::Global),
            [] => {
                let exclude = self.resolve_excluded(request, None);
                let query = TopQuery {
                    records: RecordQuery::new(RecordScope::Roots).excluding(exclude),
                    ranking: Metric::Confirmed,
                    limit: self.settings.max_jurisdictions,
                };
                let top = self.repository.top_jurisdictions(&query).await?;
                if top.is_empty() {
                    return Ok(Selection::Global);
                }
                Ok(Selection::Separate {
                    jurisdictions: top,
                    exclude: Vec::new(),
                })
            }
            [country] if !options.aggregate => self.breakout(request, country).await,
            [country] => self.rollup(request, country),
            many => Ok(Selection::Separate {
                jurisdictions: many.to_vec(),
                exclude: self.resolve_excluded(request, None),
            }),
        }
    }

    /// Regions of a single country, each in its own series.
    async fn breakout(&self, request: &CasesChartRequest, country: &Arc<Jurisdiction>) -> Result<Selection, ChartError> {
        let included = request.included();
        let jurisdictions = if !included.is_empty() {
            self.resolve_regions(country, included.into_iter().take(self.settings.max_jurisdictions))?
        } else {
            let regions = self.directory.regions(country);
            if regions.len() > 1 {
                let ids = regions.iter().map(|r| r.id).collect();
                let query = TopQuery {
                    records: RecordQuery::new(RecordScope::Jurisdictions(ids))
                        .excluding(self.resolve_excluded(request, Some(country))),
                    ranking: Metric::Confirmed,
                    limit: self.settings.max_jurisdictions,
                };
                self.repository.top_jurisdictions(&query).await?
            } else {
                vec![country.clone()]
            }
        };
        Ok(Selection::Separate {
            jurisdictions,
            exclude: Vec::new(),
        })
    }

    /// A single country, optionally restricted to a subset of its regions.
    fn rollup(&self, request: &CasesChartRequest, country: &Arc<Jurisdiction>) -> Result<Selection, ChartError> {
        let regions = self.directory.regions(country);
        let included = request.included();
        let selected = if regions.len() <= 1 {
            Vec::new()
        } else if !included.is_empty() {
            self.resolve_regions(country, included.into_iter())?
        } else {
            let exclude = self.resolve_excluded(request, Some(country));
            if exclude.is_empty() {
                Vec::new()
            } else {
                regions.into_iter().filter(|r| !exclude.contains(&r.id)).collect()
            }
        };

        if selected.is_empty() {
            return Ok(Selection::Separate {
                jurisdictions: vec![country.clone()],
                exclude: Vec::new(),
            });
        }
        Ok(Selection::Rollup {
            country: country.clone(),
            regions: selected,
        })
    }

    fn resolve_regions<'a>(
        &self,
        country: &Jurisdiction,
        names: impl Iterator<Item = &'a str>,
    ) -> Result<Vec<Arc<Jurisdiction>>, ChartError> {
        names
            .map(|name| {
                self.directory
                    .region(country, name)
                    .ok_or_else(|| ChartError::UnresolvedReference(name.to_string()))
            })
            .collect()
    }

    /// Exclusions are best effort: unknown names are logged and ignored.
    fn resolve_excluded(&self, request: &CasesChartRequest, country: Option<&Arc<Jurisdiction>>) -> Vec<JurisdictionId> {
        request
            .excluded()
            .into_iter()
            .filter_map(|name| {
                let found = match country {
                    Some(country) => self.directory.region(country, name),
                    None => self.directory.resolve(name),
                };
                if found.is_none() {
                    tracing::warn!("Ignoring unknown excluded jurisdiction {:?}", name);
                }
                found.map(|j| j.id)
            })
            .collect()
    }

    async fn fetch(&self, selection: &Selection) -> Result<Vec<CaseRecord>, ChartError> {
        let records: Vec<CaseRecord> = match selection {
            Selection::Global => self
                .repository
                .query_records(&RecordQuery::new(RecordScope::Roots))
                .await?
                .into_iter()
                .map(|r| r.reattributed(None))
                .collect(),
            Selection::Separate { jurisdictions, exclude } => {
                let ids = jurisdictions.iter().map(|j| j.id).collect();
                let query = RecordQuery::new(RecordScope::Jurisdictions(ids)).excluding(exclude.clone());
                self.repository.query_records(&query).await?
            }
            Selection::Rollup { country, regions } => {
                let ids = regions.iter().map(|r| r.id).collect();
                self.repository
                    .query_records(&RecordQuery::new(RecordScope::Jurisdictions(ids)))
                    .await?
                    .into_iter()
                    .map(|r| r.reattributed(Some(country.clone())))
                    .collect()
            }
        };
        Ok(records)
    }
}
