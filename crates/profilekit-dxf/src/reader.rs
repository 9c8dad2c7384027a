//! Reads drawing entities out of a DXF file.
//!
//! [`DxfSource::entities`] walks the ENTITIES section lazily and can be
//! called any number of times. INSERT references are expanded one level deep
//! by transforming the referenced block's entities into place.

use crate::error::{DxfError, DxfResult};
use dxf::entities::{Entity, EntityType, Insert};
use dxf::{Block, Drawing};
use profilekit_core::{Plane, Point2, PolyVertex, RawEntity};
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A loaded drawing.
pub struct DxfSource {
    drawing: Drawing,
    path: Option<PathBuf>,
}

impl DxfSource {
    /// Loads a DXF file. The file handle is released before this returns.
    pub fn open<P: AsRef<Path>>(path: P) -> DxfResult<Self> {
        let path = path.as_ref();
        let drawing = Drawing::load_file(path).map_err(|source| DxfError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        info!(
            path = %path.display(),
            entities = drawing.entities().count(),
            blocks = drawing.blocks().count(),
            "Loaded DXF drawing"
        );
        Ok(Self {
            drawing,
            path: Some(path.to_path_buf()),
        })
    }

    /// Wraps a drawing that is already in memory.
    pub fn from_drawing(drawing: Drawing) -> Self {
        Self {
            drawing,
            path: None,
        }
    }

    pub fn drawing(&self) -> &Drawing {
        &self.drawing
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Iterates the drawing's entities projected onto `plane`.
    pub fn entities(&self, plane: Plane) -> Entities<'_> {
        let blocks = self
            .drawing
            .blocks()
            .map(|block| (block.name.as_str(), block))
            .collect();
        Entities {
            top: Box::new(self.drawing.entities()),
            blocks,
            plane,
            pending: VecDeque::new(),
        }
    }
}

/// Lazy iterator over a drawing's supported entities.
pub struct Entities<'a> {
    top: Box<dyn Iterator<Item = &'a Entity> + 'a>,
    blocks: HashMap<&'a str, &'a Block>,
    plane: Plane,
    /// Expanded block contents still to be yielded.
    pending: VecDeque<RawEntity>,
}

impl Entities<'_> {
    fn expand(&mut self, insert: &Insert) {
        let Some(block) = self.blocks.get(insert.name.as_str()) else {
            warn!(block = %insert.name, "INSERT references a missing block");
            return;
        };
        let placement = Placement::from_insert(insert, &block.base_point);
        for entity in &block.entities {
            if let EntityType::Insert(nested) = &entity.specific {
                debug!(block = %insert.name, nested = %nested.name, "Skipping nested INSERT");
                continue;
            }
            if let Some(raw) = convert(entity, &placement, self.plane) {
                self.pending.push_back(raw);
            }
        }
    }
}

impl Iterator for Entities<'_> {
    type Item = RawEntity;

    fn next(&mut self) -> Option<RawEntity> {
        loop {
            if let Some(raw) = self.pending.pop_front() {
                return Some(raw);
            }
            let entity = self.top.next()?;
            match &entity.specific {
                EntityType::Insert(insert) => self.expand(insert),
                _ => {
                    if let Some(raw) = convert(entity, &Placement::IDENTITY, self.plane) {
                        return Some(raw);
                    }
                }
            }
        }
    }
}

/// Affine placement of block geometry by an INSERT.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Placement {
    base: [f64; 3],
    scale: [f64; 3],
    /// Rotation about the Z axis, radians.
    rotation: f64,
    location: [f64; 3],
}

impl Placement {
    const IDENTITY: Placement = Placement {
        base: [0.0; 3],
        scale: [1.0; 3],
        rotation: 0.0,
        location: [0.0; 3],
    };

    fn from_insert(insert: &Insert, base: &dxf::Point) -> Self {
        Self {
            base: [base.x, base.y, base.z],
            scale: [
                insert.x_scale_factor,
                insert.y_scale_factor,
                insert.z_scale_factor,
            ],
            rotation: insert.rotation.to_radians(),
            location: [insert.location.x, insert.location.y, insert.location.z],
        }
    }

    fn apply(&self, x: f64, y: f64, z: f64) -> (f64, f64, f64) {
        let lx = (x - self.base[0]) * self.scale[0];
        let ly = (y - self.base[1]) * self.scale[1];
        let lz = (z - self.base[2]) * self.scale[2];
        let (sin, cos) = self.rotation.sin_cos();
        (
            self.location[0] + lx * cos - ly * sin,
            self.location[1] + lx * sin + ly * cos,
            self.location[2] + lz,
        )
    }

    /// Opposite-signed X and Y scales mirror the block, reversing arc direction.
    fn mirrors(&self) -> bool {
        self.scale[0] * self.scale[1] < 0.0
    }

    fn scale_radius(&self, radius: f64) -> f64 {
        radius * self.scale[0].abs()
    }
}

/// Converts one supported entity, or `None` for anything else.
fn convert(entity: &Entity, placement: &Placement, plane: Plane) -> Option<RawEntity> {
    // xy, yz and zx are cyclic axis orders, so projection keeps arc direction.
    let project = |x: f64, y: f64, z: f64| -> Point2 {
        let (px, py, pz) = placement.apply(x, y, z);
        let (u, v) = plane.project(px, py, pz);
        Point2::new(u, v)
    };
    let bulge_sign = if placement.mirrors() { -1.0 } else { 1.0 };
    let layer = Some(entity.common.layer.clone()).filter(|l| !l.is_empty());

    match &entity.specific {
        EntityType::Line(line) => Some(RawEntity::Line {
            start: project(line.p1.x, line.p1.y, line.p1.z),
            end: project(line.p2.x, line.p2.y, line.p2.z),
            layer,
        }),
        EntityType::Circle(circle) => {
            if (placement.scale[0].abs() - placement.scale[1].abs()).abs() > f64::EPSILON {
                warn!("Non-uniform INSERT scale turns a circle into an ellipse; using X scale");
            }
            Some(RawEntity::Circle {
                center: project(circle.center.x, circle.center.y, circle.center.z),
                radius: placement.scale_radius(circle.radius),
                layer,
            })
        }
        EntityType::LwPolyline(polyline) => {
            let vertices = polyline
                .vertices
                .iter()
                .map(|v| PolyVertex {
                    point: project(v.x, v.y, entity.common.elevation),
                    bulge: v.bulge * bulge_sign,
                })
                .collect();
            Some(RawEntity::Polyline {
                vertices,
                // Bit 0 (value 1) indicates closed
                closed: polyline.flags & 1 != 0,
                layer,
            })
        }
        EntityType::Polyline(polyline) => {
            let vertices = polyline
                .vertices()
                .map(|v| PolyVertex {
                    point: project(v.location.x, v.location.y, v.location.z),
                    bulge: v.bulge * bulge_sign,
                })
                .collect();
            Some(RawEntity::Polyline {
                vertices,
                closed: polyline.flags & 1 != 0,
                layer,
            })
        }
        _ => {
            debug!(handle = ?entity.common.handle, "Ignoring unsupported entity");
            None
        }
    }
}
