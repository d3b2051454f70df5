//! Task descriptions: map border, start point, obstacles and boosters.

use std::fmt;

use crate::{parse::Scanner, Booster, BoosterCode, ParseError, Point};

const SECTION_DELIMITER: char = '#';
const LIST_DELIMITER: char = ';';
const VERTEX_DELIMITER: char = ',';
const TASK_SECTIONS: usize = 4;

/// Closed axis-aligned polygon given as its vertices in order.
pub type Polygon = Vec<Point>;

/// Parsed task description in the `border#start#obstacles#boosters` format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Task {
    /// Outline of the playable area.
    pub border: Polygon,
    /// Initial position of the first bot.
    pub start: Point,
    /// Impassable regions punched out of the playable area.
    pub obstacles: Vec<Polygon>,
    /// Boosters and spawn markers placed on the map.
    pub boosters: Vec<Booster>,
}

impl Task {
    /// Parses a task description.
    ///
    /// Surrounding whitespace is ignored; offsets in errors refer to the
    /// trimmed text.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let text = text.trim();
        let sections: Vec<&str> = text.split(SECTION_DELIMITER).collect();
        if sections.len() != TASK_SECTIONS {
            return Err(ParseError::SectionCount {
                expected: TASK_SECTIONS,
                found: sections.len(),
            });
        }

        let mut bases = [0; TASK_SECTIONS];
        for index in 1..TASK_SECTIONS {
            bases[index] = bases[index - 1] + sections[index - 1].len() + 1;
        }

        let border = parse_polygon(sections[0], bases[0])?;

        let mut scanner = Scanner::with_base(sections[1], bases[1]);
        let start = scanner.point()?;
        scanner.finish()?;

        let obstacles = split_list(sections[2], bases[2])
            .map(|(item, base)| parse_polygon(item, base))
            .collect::<Result<_, _>>()?;
        let boosters = split_list(sections[3], bases[3])
            .map(|(item, base)| parse_booster(item, base))
            .collect::<Result<_, _>>()?;

        Ok(Self {
            border,
            start,
            obstacles,
            boosters,
        })
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_polygon(f, &self.border)?;
        write!(f, "{SECTION_DELIMITER}{}{SECTION_DELIMITER}", self.start)?;
        for (index, obstacle) in self.obstacles.iter().enumerate() {
            if index != 0 {
                write!(f, "{LIST_DELIMITER}")?;
            }
            write_polygon(f, obstacle)?;
        }
        write!(f, "{SECTION_DELIMITER}")?;
        for (index, booster) in self.boosters.iter().enumerate() {
            if index != 0 {
                write!(f, "{LIST_DELIMITER}")?;
            }
            write!(f, "{booster}")?;
        }
        Ok(())
    }
}

fn write_polygon(f: &mut fmt::Formatter<'_>, polygon: &[Point]) -> fmt::Result {
    for (index, vertex) in polygon.iter().enumerate() {
        if index != 0 {
            write!(f, "{VERTEX_DELIMITER}")?;
        }
        write!(f, "{vertex}")?;
    }
    Ok(())
}

/// Splits a `;`-separated list, yielding each item with its absolute offset.
fn split_list(section: &str, base: usize) -> impl Iterator<Item = (&str, usize)> {
    let mut offset = base;
    section
        .split(LIST_DELIMITER)
        .map(move |item| {
            let start = offset;
            offset += item.len() + LIST_DELIMITER.len_utf8();
            (item, start)
        })
        .filter(|(item, _)| !item.is_empty())
}

fn parse_polygon(text: &str, base: usize) -> Result<Polygon, ParseError> {
    let mut scanner = Scanner::with_base(text, base);
    let mut polygon = Vec::new();
    if scanner.is_done() {
        return Err(ParseError::EmptyPolygon { offset: base });
    }
    loop {
        polygon.push(scanner.point()?);
        if scanner.is_done() {
            return Ok(polygon);
        }
        scanner.expect(VERTEX_DELIMITER)?;
    }
}

fn parse_booster(text: &str, base: usize) -> Result<Booster, ParseError> {
    let mut scanner = Scanner::with_base(text, base);
    let offset = scanner.offset();
    let code = match scanner.bump() {
        Some(symbol) => BoosterCode::from_symbol(symbol).ok_or(ParseError::UnexpectedChar {
            offset,
            found: symbol,
        })?,
        None => return Err(ParseError::UnexpectedEnd { offset }),
    };
    let pos = scanner.point()?;
    scanner.finish()?;
    Ok(Booster::new(code, pos))
}
