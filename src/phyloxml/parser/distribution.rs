use std::io::BufRead;

use quick_xml::events::BytesStart;

use super::{PhyloXmlError, PhyloXmlParser};
use crate::phyloxml::diagnostics::DiagnosticSink;
use crate::phyloxml::models::{Distribution, Point, Polygon};
use crate::phyloxml::vocabulary::Tag;

impl<R: BufRead, S: DiagnosticSink> PhyloXmlParser<R, S> {
    pub(super) fn parse_distribution(&mut self) -> Result<Distribution, PhyloXmlError> {
        let mut distribution = Distribution::default();
        self.read_children(Tag::Distribution, |parser, tag, e| {
            match tag {
                Tag::Desc => distribution.desc = parser.read_string(tag)?,
                Tag::Point => distribution.points.push(parser.parse_point(e)?),
                Tag::Polygon => distribution.polygons.push(parser.parse_polygon()?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(distribution)
    }

    fn parse_point(&mut self, e: &BytesStart) -> Result<Point, PhyloXmlError> {
        let mut point = Point {
            geodetic_datum: self.attribute(e, "geodetic_datum")?,
            alt_unit: self.attribute(e, "alt_unit")?,
            ..Default::default()
        };
        self.read_children(Tag::Point, |parser, tag, _| {
            match tag {
                Tag::Lat => point.lat = parser.read_parsed(tag)?,
                Tag::Long => point.long = parser.read_parsed(tag)?,
                Tag::Alt => point.alt = parser.read_parsed(tag)?,
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(point)
    }

    /// Parse a `<polygon>`; fewer than three points is reported but kept
    fn parse_polygon(&mut self) -> Result<Polygon, PhyloXmlError> {
        let mut polygon = Polygon::default();
        self.read_children(Tag::Polygon, |parser, tag, e| {
            if tag != Tag::Point {
                return Ok(false);
            }
            let point = parser.parse_point(e)?;
            polygon.points.push(point);
            Ok(true)
        })?;
        if !polygon.is_well_formed() {
            self.malformed(format!(
                "<polygon> has {} point(s); at least {} are required",
                polygon.points.len(),
                Polygon::MIN_POINTS
            ));
        }
        Ok(polygon)
    }
}
