// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::io;

use crate::{Graph, GraphError, IdError, Point, PointId, Route, RouteId};

/// First line of every points file.
pub const POINTS_HEADER: &str = "ID;Name;Latitude;Longitude";

/// First line of every routes file.
pub const ROUTES_HEADER: &str = "ID;Name;Endpoint 1;Endpoint 2;Length";

/// Accepted points file headers, canonical one first. The Portuguese variant
/// is written by older tools producing the same format.
const POINTS_HEADERS: &[&str] = &[POINTS_HEADER, "ID;Nome;Latitude;Longitude"];

/// Accepted routes file headers, canonical one first.
const ROUTES_HEADERS: &[&str] = &[
    ROUTES_HEADER,
    "ID;Nome;Extremidade 1;Extremidade 2;Comprimento",
];

const MIN_NAME_LEN: usize = 2;

/// Error encountered while parsing a points or a routes file.
/// Line numbers start at 1, with the header being the first line.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("line 1: expected header {expected:?}, got {got:?}")]
    Header { expected: &'static str, got: String },

    #[error("line {line}: expected {expected} fields, got {got}")]
    FieldCount {
        line: usize,
        expected: usize,
        got: usize,
    },

    #[error("line {line}: {source}")]
    Id {
        line: usize,
        #[source]
        source: IdError,
    },

    #[error("line {line}: name {name:?} is too short")]
    Name { line: usize, name: String },

    #[error("line {line}: invalid {field}: {raw:?}")]
    Number {
        line: usize,
        field: &'static str,
        raw: String,
    },

    #[error("line {line}: {source}")]
    Graph {
        line: usize,
        #[source]
        source: GraphError,
    },
}

/// Iterates over non-blank lines of a file, after checking that its header
/// is one of `headers`. Yields 1-based line numbers with the split fields.
fn records<R: io::BufRead>(
    reader: R,
    headers: &'static [&'static str],
) -> Result<impl Iterator<Item = Result<(usize, Vec<String>), ParseError>>, ParseError> {
    let mut lines = reader.lines();

    let got = lines.next().transpose()?.unwrap_or_default();
    let got = got.trim_start_matches('\u{feff}').trim_end();
    if !headers.iter().any(|&header| header == got) {
        return Err(ParseError::Header {
            expected: headers[0],
            got: got.to_string(),
        });
    }

    Ok(lines.enumerate().filter_map(|(idx, line)| match line {
        Err(e) => Some(Err(e.into())),
        Ok(line) if line.trim().is_empty() => None,
        Ok(line) => Some(Ok((
            idx + 2,
            line.split(';').map(|f| f.trim().to_string()).collect(),
        ))),
    }))
}

fn expect_fields(line: usize, fields: &[String], expected: usize) -> Result<(), ParseError> {
    if fields.len() == expected {
        Ok(())
    } else {
        Err(ParseError::FieldCount {
            line,
            expected,
            got: fields.len(),
        })
    }
}

fn parse_name(line: usize, raw: &str) -> Result<String, ParseError> {
    if raw.chars().count() < MIN_NAME_LEN {
        Err(ParseError::Name {
            line,
            name: raw.to_string(),
        })
    } else {
        Ok(raw.to_string())
    }
}

fn parse_number(line: usize, field: &'static str, raw: &str) -> Result<f64, ParseError> {
    raw.parse::<f64>().map_err(|_| ParseError::Number {
        line,
        field,
        raw: raw.to_string(),
    })
}

fn parse_id<T: std::str::FromStr<Err = IdError>>(line: usize, raw: &str) -> Result<T, ParseError> {
    raw.parse()
        .map_err(|source| ParseError::Id { line, source })
}

/// Parses a points file and adds all of its points to the graph.
pub(super) fn add_points<R: io::BufRead>(g: &mut Graph, reader: R) -> Result<(), ParseError> {
    for record in records(reader, POINTS_HEADERS)? {
        let (line, fields) = record?;
        expect_fields(line, &fields, 4)?;

        let point = Point {
            id: parse_id::<PointId>(line, &fields[0])?,
            name: parse_name(line, &fields[1])?,
            lat: parse_number(line, "latitude", &fields[2])?,
            lon: parse_number(line, "longitude", &fields[3])?,
        };

        g.insert_point(point)
            .map_err(|source| ParseError::Graph { line, source })?;
    }
    Ok(())
}

/// Parses a routes file and adds all of its routes to the graph.
/// All referenced points must already be present in the graph.
pub(super) fn add_routes<R: io::BufRead>(g: &mut Graph, reader: R) -> Result<(), ParseError> {
    for record in records(reader, ROUTES_HEADERS)? {
        let (line, fields) = record?;
        expect_fields(line, &fields, 5)?;

        let route = Route {
            id: parse_id::<RouteId>(line, &fields[0])?,
            name: parse_name(line, &fields[1])?,
            ends: [
                parse_id::<PointId>(line, &fields[2])?,
                parse_id::<PointId>(line, &fields[3])?,
            ],
            length: parse_number(line, "length", &fields[4])?,
        };

        g.insert_route(route)
            .map_err(|source| ParseError::Graph { line, source })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(data: &str) -> Result<Graph, ParseError> {
        let mut g = Graph::default();
        add_points(&mut g, data.as_bytes())?;
        Ok(g)
    }

    fn routes(data: &str) -> Result<Graph, ParseError> {
        let mut g = points(
            "ID;Name;Latitude;Longitude\n\
             #A;Alfa;0;0\n\
             #B;Bravo;0;1\n",
        )
        .unwrap();
        add_routes(&mut g, data.as_bytes())?;
        Ok(g)
    }

    #[test]
    fn points_ok() {
        let g = points(
            "\u{feff}ID;Name;Latitude;Longitude\r\n\
             #A;Alfa;-10.5;20.25\r\n\
             \r\n\
             #B; Bravo ;0;-180\r\n\
             \n\n",
        )
        .unwrap();

        assert_eq!(g.len(), 2);
        let b = g.get_point(&"#B".parse().unwrap()).unwrap();
        assert_eq!(b.name, "Bravo");
        assert_eq!(b.lon, -180.0);
    }

    #[test]
    fn header_only() {
        let g = points("ID;Name;Latitude;Longitude\n").unwrap();
        assert!(g.is_empty());
    }

    #[test]
    fn points_bad_header() {
        let err = points("ID;Name;Lat;Lon\n#A;Alfa;0;0\n").unwrap_err();
        assert!(matches!(err, ParseError::Header { .. }));

        let err = points("").unwrap_err();
        assert!(matches!(err, ParseError::Header { ref got, .. } if got.is_empty()));
    }

    #[test]
    fn points_bad_records() {
        let header = "ID;Name;Latitude;Longitude\n";

        let err = points(&format!("{header}#A;Alfa;0\n")).unwrap_err();
        assert!(matches!(
            err,
            ParseError::FieldCount {
                line: 2,
                expected: 4,
                got: 3
            }
        ));

        let err = points(&format!("{header}#A;Alfa;0;0\nA;Bravo;0;0\n")).unwrap_err();
        assert!(matches!(err, ParseError::Id { line: 3, .. }));

        let err = points(&format!("{header}#A;A;0;0\n")).unwrap_err();
        assert!(matches!(err, ParseError::Name { line: 2, .. }));

        let err = points(&format!("{header}#A;Alfa;north;0\n")).unwrap_err();
        assert!(matches!(
            err,
            ParseError::Number {
                line: 2,
                field: "latitude",
                ..
            }
        ));

        let err = points(&format!("{header}#A;Alfa;0;\n")).unwrap_err();
        assert!(matches!(
            err,
            ParseError::Number {
                field: "longitude",
                ..
            }
        ));

        let err = points(&format!("{header}#A;Alfa;0;200\n")).unwrap_err();
        assert!(matches!(
            err,
            ParseError::Graph {
                line: 2,
                source: GraphError::InvalidCoordinates { .. }
            }
        ));

        let err = points(&format!("{header}#A;Alfa;0;0\n#A;Again;1;1\n")).unwrap_err();
        assert!(matches!(
            err,
            ParseError::Graph {
                line: 3,
                source: GraphError::DuplicatePoint(_)
            }
        ));
        assert_eq!(err.to_string(), "line 3: point #A already exists");
    }

    #[test]
    fn routes_ok() {
        let g = routes(
            "ID;Name;Endpoint 1;Endpoint 2;Length\n\
             &AB;Alfa-Bravo;#A;#B;111.5\n\
             &BA;Bravo-Alfa;#B;#A;120\n",
        )
        .unwrap();

        assert_eq!(g.route_count(), 2);
        let ab = g.get_route(&"&AB".parse().unwrap()).unwrap();
        assert_eq!(ab.length, 111.5);
    }

    #[test]
    fn portuguese_headers() {
        let mut g = Graph::default();
        add_points(
            &mut g,
            "ID;Nome;Latitude;Longitude\n\
             #A;Alfa;0;0\n\
             #B;Bravo;0;1\n"
                .as_bytes(),
        )
        .unwrap();
        add_routes(
            &mut g,
            "ID;Nome;Extremidade 1;Extremidade 2;Comprimento\n\
             &AB;Alfa-Bravo;#A;#B;112\n"
                .as_bytes(),
        )
        .unwrap();

        assert_eq!(g.len(), 2);
        assert_eq!(g.route_count(), 1);
        assert_eq!(g.get_route(&"&AB".parse().unwrap()).unwrap().length, 112.0);
    }

    #[test]
    fn header_kinds_are_not_mixed() {
        let mut g = Graph::default();
        let data = "ID;Nome;Extremidade 1;Extremidade 2;Comprimento\n";
        let err = add_points(&mut g, data.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            ParseError::Header {
                expected: POINTS_HEADER,
                ..
            }
        ));
    }

    #[test]
    fn routes_bad_records() {
        let header = "ID;Name;Endpoint 1;Endpoint 2;Length\n";

        let err = routes("ID;Name;Endpoint 1;Endpoint 2\n").unwrap_err();
        assert!(matches!(err, ParseError::Header { .. }));

        let err = routes(&format!("{header}&AB;Alfa-Bravo;#A;#B\n")).unwrap_err();
        assert!(matches!(err, ParseError::FieldCount { expected: 5, .. }));

        let err = routes(&format!("{header}#AB;Alfa-Bravo;#A;#B;1\n")).unwrap_err();
        assert!(matches!(err, ParseError::Id { line: 2, .. }));

        let err = routes(&format!("{header}&AB;Alfa-Bravo;A;#B;1\n")).unwrap_err();
        assert!(matches!(err, ParseError::Id { line: 2, .. }));

        let err = routes(&format!("{header}&AB;X;#A;#B;1\n")).unwrap_err();
        assert!(matches!(err, ParseError::Name { .. }));

        let err = routes(&format!("{header}&AB;Alfa-Bravo;#A;#C;1\n")).unwrap_err();
        assert!(matches!(
            err,
            ParseError::Graph {
                source: GraphError::UnknownEnd { .. },
                ..
            }
        ));

        let err = routes(&format!("{header}&AB;Alfa-Bravo;#A;#B;far\n")).unwrap_err();
        assert!(matches!(err, ParseError::Number { field: "length", .. }));

        let err = routes(&format!("{header}&AB;Alfa-Bravo;#A;#B;-1\n")).unwrap_err();
        assert!(matches!(
            err,
            ParseError::Graph {
                source: GraphError::InvalidLength { .. },
                ..
            }
        ));

        let err = routes(&format!(
            "{header}&AB;Alfa-Bravo;#A;#B;1\n&AB;Alfa-Bravo;#B;#A;1\n"
        ))
        .unwrap_err();
        assert!(matches!(
            err,
            ParseError::Graph {
                line: 3,
                source: GraphError::DuplicateRoute(_)
            }
        ));
    }
}
