//! CSV export shapes for selection results.

use anyhow::Result;
use std::io::Write;

use crate::models::ParsedAddress;
use crate::select::SelectedAddress;

/// Export filename: facility label with spaces replaced by underscores, a
/// mode-specific suffix, `.csv`.
pub fn export_filename(facility_label: &str, suffix: &str) -> String {
    format!("{}_{}.csv", facility_label.replace(' ', "_"), suffix)
}

/// Distance-mode suffix, e.g. "0.5mi".
pub fn radius_suffix(radius_miles: f64) -> String {
    format!("{radius_miles}mi")
}

/// Distance mode: `address,longitude,latitude,distanceMiles`.
pub fn write_distance_csv<W: Write>(writer: W, matched: &[SelectedAddress]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["address", "longitude", "latitude", "distanceMiles"])?;
    for m in matched {
        csv.write_record(&[
            m.record.raw_text.clone(),
            m.record.point.lon.to_string(),
            m.record.point.lat.to_string(),
            m.distance_miles.unwrap_or_default().to_string(),
        ])?;
    }
    csv.flush()?;
    Ok(())
}

/// Containment mode, unparsed: single `address` column.
pub fn write_containment_csv<W: Write>(writer: W, matched: &[SelectedAddress]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["address"])?;
    for m in matched {
        csv.write_record([m.record.raw_text.as_str()])?;
    }
    csv.flush()?;
    Ok(())
}

/// Containment mode, parsed rows.
pub fn write_parsed_csv<W: Write>(writer: W, rows: &[ParsedAddress]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["houseNumber", "street", "city", "state", "zip", "original"])?;
    for row in rows {
        csv.write_record([
            row.house_number.as_str(),
            row.street.as_str(),
            row.city.as_str(),
            row.state.as_str(),
            row.zip.as_str(),
            row.original.as_str(),
        ])?;
    }
    csv.flush()?;
    Ok(())
}

/// Containment mode, expanded rows: house number and street rejoined into
/// one `address` column, one row per expanded unit.
pub fn write_expanded_csv<W: Write>(writer: W, rows: &[ParsedAddress]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["address", "unit", "city", "state", "zip", "original"])?;
    for row in rows {
        csv.write_record(&[
            row.street_address(),
            row.unit.clone(),
            row.city.clone(),
            row.state.clone(),
            row.zip.clone(),
            row.original.clone(),
        ])?;
    }
    csv.flush()?;
    Ok(())
}
