//! Writes offset rings back out as DXF.

use crate::error::{DxfError, DxfResult};
use dxf::entities::{Entity, EntityType, LwPolyline};
use dxf::LwPolylineVertex;
use dxf::enums::AcadVersion;
use dxf::tables::Layer;
use dxf::Drawing;
use profilekit_core::Point2;
use std::path::Path;
use tracing::info;

/// Layer used when none is configured.
pub const DEFAULT_LAYER: &str = "OFFSET";

/// Serialises rings as closed LWPOLYLINE entities on one layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DxfWriter {
    layer: String,
}

impl Default for DxfWriter {
    fn default() -> Self {
        Self::new(DEFAULT_LAYER)
    }
}

impl DxfWriter {
    pub fn new(layer: impl Into<String>) -> Self {
        Self {
            layer: layer.into(),
        }
    }

    pub fn layer(&self) -> &str {
        &self.layer
    }

    /// Builds an in-memory drawing holding one polyline per ring.
    pub fn to_drawing<'a, I>(&self, rings: I) -> DxfResult<Drawing>
    where
        I: IntoIterator<Item = &'a [Point2]>,
    {
        let mut drawing = Drawing::new();
        // LWPOLYLINE does not exist before R14.
        drawing.header.version = AcadVersion::R2000;
        if !drawing.layers().any(|layer| layer.name == self.layer) {
            drawing.add_layer(Layer {
                name: self.layer.clone(),
                ..Default::default()
            });
        }

        for (index, ring) in rings.into_iter().enumerate() {
            if ring.len() < 3 {
                return Err(DxfError::DegenerateRing {
                    index,
                    vertices: ring.len(),
                });
            }
            let mut polyline = LwPolyline::default();
            polyline.vertices = ring
                .iter()
                .map(|p| LwPolylineVertex {
                    x: p.x,
                    y: p.y,
                    ..Default::default()
                })
                .collect();
            polyline.flags = 1;

            let mut entity = Entity::new(EntityType::LwPolyline(polyline));
            entity.common.layer = self.layer.clone();
            drawing.add_entity(entity);
        }

        Ok(drawing)
    }

    /// Writes `rings` to `path`, returning how many polylines were written.
    pub fn write<'a, I, P>(&self, rings: I, path: P) -> DxfResult<usize>
    where
        I: IntoIterator<Item = &'a [Point2]>,
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let drawing = self.to_drawing(rings)?;
        let count = drawing.entities().count();
        drawing.save_file(path).map_err(|source| DxfError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), polylines = count, layer = %self.layer, "Wrote DXF");
        Ok(count)
    }
}
