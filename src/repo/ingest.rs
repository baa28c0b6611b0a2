//! CSV ingest with text-to-numeric coordinate coercion.
//!
//! Coordinates arrive as text in some exports; a row whose coordinate cells
//! do not parse as numbers is dropped with a warning, never fatal. Rows that
//! survive coercion are normalized in one batch so order is preserved.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::File;
use tracing::warn;

use crate::config::{FacilityTableConfig, RegionConfig};
use crate::crs::CrsTransformer;
use crate::models::{AddressRecord, FacilityRecord};

#[derive(Debug, Deserialize)]
struct RawAddressRow {
    address: String,
    lon: String,
    lat: String,
}

#[derive(Debug, Deserialize)]
struct RawFacilityRow {
    label: String,
    region_key: String,
    lon: String,
    lat: String,
}

fn coerce_pair(lon: &str, lat: &str) -> Option<(f64, f64)> {
    let x: f64 = lon.trim().parse().ok()?;
    let y: f64 = lat.trim().parse().ok()?;
    Some((x, y))
}

/// Read one region's address table and normalize it into WGS84.
pub fn read_address_table(region: &RegionConfig) -> Result<Vec<AddressRecord>> {
    let file = File::open(&region.path)
        .with_context(|| format!("Failed to open address table {}", region.path.display()))?;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(region.delimiter_byte())
        .from_reader(file);

    let mut texts = Vec::new();
    let mut pairs = Vec::new();
    let mut dropped = 0usize;

    for (line, row) in reader.deserialize::<RawAddressRow>().enumerate() {
        let row = row.with_context(|| {
            format!("Malformed CSV row {} in {}", line + 1, region.path.display())
        })?;
        match coerce_pair(&row.lon, &row.lat) {
            Some(pair) => {
                texts.push(row.address);
                pairs.push(pair);
            }
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        warn!(
            "Region `{}`: dropped {} row(s) with non-numeric coordinates",
            region.key, dropped
        );
    }

    let transformer = CrsTransformer::from_code(&region.crs)?;
    let points = transformer.normalize(&pairs)?;

    Ok(texts
        .into_iter()
        .zip(points)
        .map(|(raw_text, point)| AddressRecord {
            raw_text,
            point,
            region_key: region.key.clone(),
        })
        .collect())
}

/// Read the facility table and normalize it into WGS84.
pub fn read_facility_table(table: &FacilityTableConfig) -> Result<Vec<FacilityRecord>> {
    let file = File::open(&table.path)
        .with_context(|| format!("Failed to open facility table {}", table.path.display()))?;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(table.delimiter_byte())
        .from_reader(file);

    let mut rows = Vec::new();
    let mut pairs = Vec::new();
    let mut dropped = 0usize;

    for (line, row) in reader.deserialize::<RawFacilityRow>().enumerate() {
        let row = row.with_context(|| {
            format!("Malformed CSV row {} in {}", line + 1, table.path.display())
        })?;
        match coerce_pair(&row.lon, &row.lat) {
            Some(pair) => {
                rows.push((row.label, row.region_key));
                pairs.push(pair);
            }
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        warn!("Facility table: dropped {dropped} row(s) with non-numeric coordinates");
    }

    let transformer = CrsTransformer::from_code(&table.crs)?;
    let points = transformer.normalize(&pairs)?;

    Ok(rows
        .into_iter()
        .zip(points)
        .map(|((label, region_key), point)| FacilityRecord {
            label,
            point,
            region_key,
        })
        .collect())
}
