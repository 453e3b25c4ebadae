//! Region catalog
//!
//! Ordered collection of named, page-anchored regions. Insertion order is
//! display order; names are user-assigned and not required to be unique.
//! The catalog serializes to an ordered stream of plain
//! `(x, y, width, height, name, page)` records with no header and no
//! version tag.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::geometry::{Point, RectShape};

/// A named rectangle anchored to a page, reapplied to every loaded document
/// during extraction.
#[derive(Debug, Clone)]
pub struct Region {
    pub name: String,
    /// 1-based page number the region is anchored to.
    pub page: u32,
    pub shape: RectShape,
    /// Drives whether the region is drawn on the canvas. Never persisted.
    pub selected: bool,
}

impl Region {
    pub fn new(name: impl Into<String>, page: u32) -> Self {
        Self {
            name: name.into(),
            page,
            shape: RectShape::default(),
            selected: false,
        }
    }

    /// Portable record form of this region.
    pub fn record(&self) -> RegionRecord {
        RegionRecord {
            x: self.shape.origin.x as i32,
            y: self.shape.origin.y as i32,
            width: self.shape.size.0 as i32,
            height: self.shape.size.1 as i32,
            name: self.name.clone(),
            page: self.page,
        }
    }

    /// Overwrite geometry from a record, leaving construction state intact.
    pub fn apply_record(&mut self, record: &RegionRecord) {
        self.shape.origin = Point::new(record.x as f32, record.y as f32);
        self.shape.size = (record.width as f32, record.height as f32);
    }
}

/// Persisted form of one region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionRecord {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub name: String,
    pub page: u32,
}

/// The ordered set of all currently defined regions.
#[derive(Debug, Default)]
pub struct RegionCatalog {
    regions: Vec<Region>,
}

impl RegionCatalog {
    /// Append a new region with default geometry and return its index.
    pub fn create(&mut self, name: impl Into<String>, page: u32) -> usize {
        self.regions.push(Region::new(name, page));
        self.regions.len() - 1
    }

    pub fn rename(&mut self, index: usize, new_name: impl Into<String>) {
        if let Some(region) = self.regions.get_mut(index) {
            region.name = new_name.into();
        }
    }

    pub fn remove(&mut self, index: usize) {
        if index < self.regions.len() {
            self.regions.remove(index);
        }
    }

    pub fn remove_all(&mut self) {
        self.regions.clear();
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Region> {
        self.regions.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Region> {
        self.regions.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    /// Focus one region: it becomes the single selected region across the
    /// whole catalog.
    pub fn focus(&mut self, index: usize) {
        for (i, region) in self.regions.iter_mut().enumerate() {
            region.selected = i == index;
        }
    }

    /// Index of the currently focused region, if any.
    pub fn focused(&self) -> Option<usize> {
        self.regions.iter().position(|r| r.selected)
    }

    /// Regions the canvas should draw for `page`: anchored to that page and
    /// currently selected. Unselected regions are intentionally not drawn.
    pub fn drawable_on_page(&self, page: u32) -> impl Iterator<Item = &Region> {
        self.regions
            .iter()
            .filter(move |r| r.page == page && r.selected)
    }

    /// Snapshot of all regions as records, in display order.
    pub fn records(&self) -> Vec<RegionRecord> {
        self.regions.iter().map(Region::record).collect()
    }

    /// Replace the catalog contents from records, reconstructing each region
    /// through the normal creation path and then overwriting its geometry.
    pub fn apply_records(&mut self, records: &[RegionRecord]) {
        self.remove_all();
        for record in records {
            let index = self.create(record.name.clone(), record.page);
            if let Some(region) = self.get_mut(index) {
                region.apply_record(record);
            }
        }
    }
}

/// Save the catalog as a binary record stream.
pub fn save_catalog(catalog: &RegionCatalog, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("could not create region set file {}", path.display()))?;
    bincode::serialize_into(BufWriter::new(file), &catalog.records())
        .with_context(|| format!("could not write region set file {}", path.display()))?;
    Ok(())
}

/// Load a binary record stream.
pub fn load_records(path: &Path) -> Result<Vec<RegionRecord>> {
    let file = File::open(path)
        .with_context(|| format!("could not open region set file {}", path.display()))?;
    let records = bincode::deserialize_from(BufReader::new(file))
        .with_context(|| format!("malformed region set file {}", path.display()))?;
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{DEFAULT_OFFSET, DEFAULT_SIZE};

    #[test]
    fn test_create_uses_default_geometry() {
        let mut catalog = RegionCatalog::default();
        let index = catalog.create("Title", 1);
        let region = catalog.get(index).unwrap();
        assert_eq!(region.shape.origin.x, DEFAULT_OFFSET.0);
        assert_eq!(region.shape.origin.y, DEFAULT_OFFSET.1);
        assert_eq!(region.shape.size, DEFAULT_SIZE);
        assert_eq!(region.page, 1);
        assert!(!region.selected);
    }

    #[test]
    fn test_names_need_not_be_unique() {
        let mut catalog = RegionCatalog::default();
        catalog.create("Title", 1);
        catalog.create("Title", 2);
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_focus_is_exclusive() {
        let mut catalog = RegionCatalog::default();
        catalog.create("a", 1);
        catalog.create("b", 1);
        catalog.create("c", 2);

        catalog.focus(1);
        assert_eq!(catalog.focused(), Some(1));

        catalog.focus(2);
        assert_eq!(catalog.focused(), Some(2));
        assert!(!catalog.get(1).unwrap().selected);
    }

    #[test]
    fn test_drawable_requires_matching_page_and_selection() {
        let mut catalog = RegionCatalog::default();
        catalog.create("a", 1);
        catalog.create("b", 1);
        catalog.create("c", 2);
        catalog.focus(0);

        let on_page_1: Vec<_> = catalog.drawable_on_page(1).collect();
        assert_eq!(on_page_1.len(), 1);
        assert_eq!(on_page_1[0].name, "a");

        // The focused region is on page 1, so page 2 draws nothing even
        // though region "c" lives there.
        assert_eq!(catalog.drawable_on_page(2).count(), 0);
    }

    #[test]
    fn test_record_roundtrip_preserves_geometry_and_order() {
        let mut catalog = RegionCatalog::default();
        let a = catalog.create("first", 1);
        catalog.get_mut(a).unwrap().shape.origin = Point::new(40.0, 60.0);
        catalog.get_mut(a).unwrap().shape.size = (120.0, 80.0);
        catalog.create("second", 3);

        let records = catalog.records();
        assert_eq!(records[0].x, 40);
        assert_eq!(records[0].y, 60);
        assert_eq!(records[0].width, 120);
        assert_eq!(records[0].height, 80);

        let mut restored = RegionCatalog::default();
        restored.apply_records(&records);
        assert_eq!(restored.len(), 2);
        assert_eq!(restored.get(0).unwrap().name, "first");
        assert_eq!(restored.get(1).unwrap().name, "second");
        assert_eq!(restored.get(1).unwrap().page, 3);
        assert_eq!(restored.records(), records);
    }

    #[test]
    fn test_apply_records_replaces_existing_regions() {
        let mut catalog = RegionCatalog::default();
        catalog.create("old", 1);
        catalog.apply_records(&[RegionRecord {
            x: 0,
            y: 0,
            width: 10,
            height: 10,
            name: "new".into(),
            page: 2,
        }]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(0).unwrap().name, "new");
    }

    #[test]
    fn test_save_and_load_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("regions.rects");

        let mut catalog = RegionCatalog::default();
        catalog.create("Title", 1);
        catalog.create("Footer", 4);
        // Selection is transient and must not survive the roundtrip.
        catalog.focus(0);

        save_catalog(&catalog, &path).unwrap();
        let records = load_records(&path).unwrap();
        assert_eq!(records, catalog.records());

        let mut restored = RegionCatalog::default();
        restored.apply_records(&records);
        assert_eq!(restored.focused(), None);
    }

    #[test]
    fn test_load_records_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.rects");
        std::fs::write(&path, b"\xff\xfe\x00garbage").unwrap();
        assert!(load_records(&path).is_err());
    }
}
