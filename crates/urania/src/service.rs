use crate::aspects::{Aspect, AspectDetector, AspectSettings};
use crate::chart::{ChartPositions, PositionResolver, ResolutionError, WireChart};
use crate::ephemeris::{AnalyticEphemeris, Body, Ephemeris};
use crate::geocoding::{CityRecord, Gazetteer, GazetteerLoadError, Geocoder};
use crate::rendering::{ChartRenderer, ImageFormat, RenderError, RenderSettings};
use std::sync::Arc;
use std::time::Duration;

/// Entry point wiring the resolver, aspect detector and renderer together.
pub struct ChartService {
    resolver: PositionResolver,
    detector: AspectDetector,
    renderer: ChartRenderer,
}

impl ChartService {
    pub fn new(
        ephemeris: Arc<dyn Ephemeris>,
        geocoder: Arc<dyn Geocoder>,
        aspect_settings: AspectSettings,
        render_settings: RenderSettings,
    ) -> Self {
        Self {
            resolver: PositionResolver::new(ephemeris, geocoder),
            detector: AspectDetector::with_settings(aspect_settings),
            renderer: ChartRenderer::with_settings(render_settings),
        }
    }

    /// Analytic ephemeris, built-in gazetteer, default settings.
    pub fn with_defaults() -> Result<Self, GazetteerLoadError> {
        Ok(Self::new(
            Arc::new(AnalyticEphemeris::new()),
            Arc::new(Gazetteer::builtin()?),
            AspectSettings::default(),
            RenderSettings::default(),
        ))
    }

    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.resolver = self.resolver.with_lookup_timeout(timeout);
        self
    }

    pub fn renderer(&self) -> &ChartRenderer {
        &self.renderer
    }

    /// Resolve positions and attach the aspects between the ten planets.
    pub async fn resolve_positions(
        &self,
        date: &str,
        time: &str,
        place: &str,
    ) -> Result<ChartPositions, ResolutionError> {
        let chart = self.resolver.resolve(date, time, place).await?;
        let aspects = self.detect_aspects(&chart);
        Ok(chart.with_aspects(aspects))
    }

    /// Aspects between the planets of a chart, using exact longitudes.
    /// The Ascendant is not aspected.
    pub fn detect_aspects(&self, chart: &ChartPositions) -> Vec<Aspect> {
        self.detector.detect(
            chart
                .longitudes
                .iter()
                .filter(|(body, _)| **body != Body::Ascendant)
                .map(|(body, lon)| (*body, *lon)),
        )
    }

    pub fn render_chart(
        &self,
        chart: &ChartPositions,
        format: ImageFormat,
    ) -> Result<Vec<u8>, RenderError> {
        self.renderer.render(chart, format)
    }

    pub fn render_wire(&self, chart: &WireChart, format: ImageFormat) -> Result<Vec<u8>, RenderError> {
        self.renderer.render_wire(chart, format)
    }

    pub async fn search_places(&self, query: &str, limit: usize) -> Vec<CityRecord> {
        self.resolver.geocoder().search(query, limit).await
    }
}
