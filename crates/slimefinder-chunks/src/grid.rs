use crate::classifier::{for_variant, ChunkClassifier};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use slimefinder_common::{ChunkCoordinate, PlatformVariant, Result, Seed, SlimeError};

/// What to evaluate: a square of chunks around a world block position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridQuery {
    pub seed: Seed,
    pub variant: PlatformVariant,
    /// Center in world block units.
    pub center_x: i32,
    pub center_z: i32,
    /// Half-width of the window in chunks.
    pub radius: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    pub chunk: ChunkCoordinate,
    pub is_marked: bool,
}

/// Result of a grid evaluation, row-major by `cx` then `cz`.
///
/// Only [`GridEvaluator`] builds one, so `cells` always holds `side() * side()` entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationGrid {
    variant: PlatformVariant,
    center: ChunkCoordinate,
    radius: u32,
    cells: Vec<GridCell>,
}

impl ClassificationGrid {
    pub fn variant(&self) -> PlatformVariant {
        self.variant
    }

    /// Chunk containing the query's center block.
    pub fn center(&self) -> ChunkCoordinate {
        self.center
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Cells per row and per column.
    pub fn side(&self) -> usize {
        self.radius as usize * 2 + 1
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn marked(&self) -> impl Iterator<Item = ChunkCoordinate> + '_ {
        self.cells
            .iter()
            .filter(|cell| cell.is_marked)
            .map(|cell| cell.chunk)
    }

    pub fn marked_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_marked).count()
    }

    /// Classification of `chunk`, or `None` if it lies outside the window.
    pub fn get(&self, chunk: ChunkCoordinate) -> Option<bool> {
        let radius = i64::from(self.radius);
        let dx = i64::from(chunk.cx) - i64::from(self.center.cx) + radius;
        let dz = i64::from(chunk.cz) - i64::from(self.center.cz) + radius;
        let side = self.side() as i64;
        if !(0..side).contains(&dx) || !(0..side).contains(&dz) {
            return None;
        }
        self.cells
            .get((dx * side + dz) as usize)
            .map(|cell| cell.is_marked)
    }
}

/// Inclusive chunk bounds of a query's window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Window {
    min_x: i32,
    max_x: i32,
    min_z: i32,
    max_z: i32,
}

impl Window {
    fn around(center: ChunkCoordinate, radius: u32) -> Result<Self> {
        let r = i64::from(radius);
        let bound = |value: i64| i32::try_from(value).map_err(|_| SlimeError::CoordinateOverflow);
        Ok(Self {
            min_x: bound(i64::from(center.cx) - r)?,
            max_x: bound(i64::from(center.cx) + r)?,
            min_z: bound(i64::from(center.cz) - r)?,
            max_z: bound(i64::from(center.cz) + r)?,
        })
    }
}

pub struct GridEvaluator;

impl GridEvaluator {
    pub fn evaluate(query: &GridQuery) -> Result<ClassificationGrid> {
        let plan = Plan::new(query)?;
        let rows: Vec<Vec<GridCell>> = (plan.window.min_x..=plan.window.max_x)
            .into_par_iter()
            .map(|cx| plan.classify_row(cx))
            .collect::<Result<_>>()?;
        Ok(plan.into_grid(rows))
    }

    /// Like [`GridEvaluator::evaluate`], but checks `keep_going` before each row
    /// and returns `Ok(None)` as soon as it reports false.
    ///
    /// An error from any cell fails the whole evaluation; no partial grid is returned.
    pub fn evaluate_while<F>(query: &GridQuery, keep_going: F) -> Result<Option<ClassificationGrid>>
    where
        F: Fn() -> bool + Sync,
    {
        let plan = Plan::new(query)?;
        let rows: Vec<Option<Vec<GridCell>>> = (plan.window.min_x..=plan.window.max_x)
            .into_par_iter()
            .map(|cx| {
                if !keep_going() {
                    return Ok(None);
                }
                plan.classify_row(cx).map(Some)
            })
            .collect::<Result<_>>()?;

        let rows: Option<Vec<Vec<GridCell>>> = rows.into_iter().collect();
        Ok(rows.map(|rows| plan.into_grid(rows)))
    }
}

/// A validated query: window bounds, cell count and the classifier to run.
struct Plan {
    variant: PlatformVariant,
    center: ChunkCoordinate,
    radius: u32,
    window: Window,
    capacity: usize,
    classifier: Box<dyn ChunkClassifier>,
}

impl Plan {
    fn new(query: &GridQuery) -> Result<Self> {
        let center = ChunkCoordinate::containing_block(query.center_x, query.center_z);
        let window = Window::around(center, query.radius)?;
        let side = (query.radius as usize)
            .checked_mul(2)
            .and_then(|n| n.checked_add(1))
            .ok_or(SlimeError::CoordinateOverflow)?;
        let capacity = side.checked_mul(side).ok_or(SlimeError::CoordinateOverflow)?;

        Ok(Plan {
            variant: query.variant,
            center,
            radius: query.radius,
            window,
            capacity,
            classifier: for_variant(query.variant, query.seed),
        })
    }

    fn classify_row(&self, cx: i32) -> Result<Vec<GridCell>> {
        classify_row(self.classifier.as_ref(), cx, self.window.min_z, self.window.max_z)
    }

    fn into_grid(self, rows: Vec<Vec<GridCell>>) -> ClassificationGrid {
        let mut cells = Vec::with_capacity(self.capacity);
        for row in rows {
            cells.extend(row);
        }
        ClassificationGrid {
            variant: self.variant,
            center: self.center,
            radius: self.radius,
            cells,
        }
    }
}

fn classify_row(
    classifier: &dyn ChunkClassifier,
    cx: i32,
    min_z: i32,
    max_z: i32,
) -> Result<Vec<GridCell>> {
    (min_z..=max_z)
        .map(|cz| {
            let chunk = ChunkCoordinate::new(cx, cz);
            Ok(GridCell {
                chunk,
                is_marked: classifier.is_marked(chunk)?,
            })
        })
        .collect()
}
