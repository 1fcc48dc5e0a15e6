pub mod config;
pub mod plot;

use anyhow::Result;
use std::fmt::Debug;

use crate::deck::{RevenueDataPoint, Role};
use crate::surface::RenderSurface;
use crate::theme::PaletteSource;

pub use config::ChartConfig;

/// The charting library as the adapter sees it.
pub trait ChartBackend {
    type Handle: Copy + Eq + Debug;

    fn construct(&mut self, surface: Role, config: &ChartConfig) -> Result<Self::Handle>;
    fn destroy(&mut self, handle: Self::Handle);
    fn resize(&mut self, handle: Self::Handle);
    fn update(&mut self, handle: Self::Handle, config: &ChartConfig);
}

struct BoundChart<H> {
    handle: H,
    config: ChartConfig,
}

/// Owns the single revenue chart bound to a drawing surface.
pub struct ChartAdapter<B: ChartBackend> {
    backend: B,
    surface: Role,
    dataset: Vec<RevenueDataPoint>,
    chart: Option<BoundChart<B::Handle>>,
}

impl<B: ChartBackend> ChartAdapter<B> {
    pub fn new(backend: B, surface: Role, dataset: &[RevenueDataPoint]) -> Self {
        Self {
            backend,
            surface,
            dataset: dataset.to_vec(),
            chart: None,
        }
    }

    /// (Re)build the chart. The previous chart on this surface is destroyed first.
    ///
    /// Does nothing while the drawing surface is not mounted.
    pub fn initialize(
        &mut self,
        surface: &dyn RenderSurface,
        palette: &dyn PaletteSource,
    ) -> Result<()> {
        if !surface.is_mounted(self.surface) {
            tracing::debug!(surface = %self.surface, "drawing surface not mounted, skipping chart");
            return Ok(());
        }

        if let Some(old) = self.chart.take() {
            self.backend.destroy(old.handle);
        }

        let config = ChartConfig::revenue(&self.dataset, palette);
        let handle = self.backend.construct(self.surface, &config)?;
        tracing::debug!(?handle, points = self.dataset.len(), "revenue chart constructed");
        self.chart = Some(BoundChart { handle, config });
        Ok(())
    }

    /// Re-apply palette colors to the existing chart without rebuilding it.
    pub fn retheme(&mut self, palette: &dyn PaletteSource) {
        if let Some(chart) = self.chart.as_mut() {
            chart.config.apply_palette(palette);
            self.backend.update(chart.handle, &chart.config);
            tracing::debug!(handle = ?chart.handle, "chart rethemed");
        }
    }

    pub fn resize(&mut self) {
        if let Some(chart) = &self.chart {
            self.backend.resize(chart.handle);
        }
    }

    pub fn handle(&self) -> Option<B::Handle> {
        self.chart.as_ref().map(|c| c.handle)
    }

    #[cfg(test)]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum BackendEvent {
        Construct(u32),
        Destroy(u32),
        Resize(u32),
        Update(u32),
    }

    /// Records every backend call and tracks live charts.
    #[derive(Debug, Default)]
    pub struct RecordingBackend {
        pub events: Vec<BackendEvent>,
        pub live: Vec<u32>,
        pub last_config: Option<ChartConfig>,
        pub fail: bool,
        next: u32,
    }

    impl ChartBackend for RecordingBackend {
        type Handle = u32;

        fn construct(&mut self, _surface: Role, config: &ChartConfig) -> Result<u32> {
            if self.fail {
                anyhow::bail!("canvas context unavailable");
            }
            self.next += 1;
            self.events.push(BackendEvent::Construct(self.next));
            self.live.push(self.next);
            self.last_config = Some(config.clone());
            Ok(self.next)
        }

        fn destroy(&mut self, handle: u32) {
            self.events.push(BackendEvent::Destroy(handle));
            self.live.retain(|h| *h != handle);
        }

        fn resize(&mut self, handle: u32) {
            self.events.push(BackendEvent::Resize(handle));
        }

        fn update(&mut self, handle: u32, config: &ChartConfig) {
            self.events.push(BackendEvent::Update(handle));
            self.last_config = Some(config.clone());
        }
    }
}
