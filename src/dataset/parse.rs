//! Reader and writer for the line-oriented dataset format.
//!
//! ```text
//! @dataset weather
//!
//! @attribute outlook sunny overcast rain
//! @attribute temperature numeric
//! @attribute play yes no
//!
//! @examples
//!
//! sunny 85 no
//! overcast 83 yes
//! ```

use std::{
    fmt,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    str::FromStr,
    sync::Arc
};

use tracing::{debug, info};

use super::Dataset;
use crate::{
    attribute::{Attribute, Attributes},
    error::{Error, Result},
    example::Example
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Header,
    Attributes,
    Examples
}

/// Incremental line parser. Nothing is handed out until `finish` succeeds.
#[derive(Debug)]
struct Parser {
    section:    Section,
    name:       Option<String>,
    attributes: Attributes,
    examples:   Vec<Example>
}

impl Parser {
    fn new() -> Self {
        Self {
            section:    Section::Header,
            name:       None,
            attributes: Attributes::new(),
            examples:   Vec::new()
        }
    }

    fn line(&mut self, number: usize, line: &str) -> Result<()> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(());
        }
        let mut tokens = line.split_whitespace();
        let keyword = tokens.next().unwrap_or_default();

        match (self.section, keyword) {
            (Section::Header, "@dataset") => {
                let name = tokens
                    .next()
                    .ok_or_else(|| Error::parse(number, "@dataset requires a name"))?;
                self.name = Some(name.to_owned());
                self.section = Section::Attributes;
                Ok(())
            }
            (Section::Header, _) => Err(Error::parse(number, "expected @dataset declaration")),
            (Section::Attributes, "@attribute") => {
                let attribute = parse_attribute(number, tokens)?;
                self.attributes.push(attribute);
                Ok(())
            }
            (Section::Attributes, "@examples") => {
                if self.attributes.is_empty() {
                    return Err(Error::parse(number, "@examples before any @attribute"));
                }
                self.section = Section::Examples;
                Ok(())
            }
            (Section::Attributes, other) => {
                Err(Error::parse(number, format!("unexpected '{other}' in attribute section")))
            }
            (Section::Examples, _) => {
                let example = parse_example(number, line, &self.attributes)?;
                self.examples.push(example);
                Ok(())
            }
        }
    }

    fn finish(self, last_line: usize) -> Result<Dataset> {
        if self.section != Section::Examples {
            return Err(Error::parse(last_line, "missing @examples section"));
        }
        let mut dataset = Dataset::with_examples(Arc::new(self.attributes), self.examples)?;
        dataset.name = self.name;
        Ok(dataset)
    }
}

fn parse_attribute<'a>(number: usize, mut tokens: impl Iterator<Item = &'a str>) -> Result<Attribute> {
    let name = tokens
        .next()
        .ok_or_else(|| Error::parse(number, "@attribute requires a name"))?;
    let values: Vec<&str> = tokens.collect();

    match values.as_slice() {
        [] => Err(Error::parse(number, format!("attribute '{name}' has no domain"))),
        ["numeric"] => Ok(Attribute::numeric(name)),
        _ if values.contains(&"numeric") => Err(Error::parse(
            number,
            format!("numeric attribute '{name}' takes no values")
        )),
        _ => Ok(Attribute::nominal(name, values))
    }
}

fn parse_example(number: usize, line: &str, attributes: &Attributes) -> Result<Example> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != attributes.len() {
        return Err(Error::parse(
            number,
            format!("expected {} values, got {}", attributes.len(), tokens.len())
        ));
    }

    tokens
        .iter()
        .zip(attributes)
        .map(|(token, attribute)| {
            if attribute.is_numeric() {
                token
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| {
                        Error::parse(
                            number,
                            format!(
                                "'{token}' is not a decimal number for attribute '{}'",
                                attribute.name()
                            )
                        )
                    })
            } else {
                attribute.index_of(token).map(|i| i as f64).ok_or_else(|| {
                    Error::parse(
                        number,
                        format!("'{token}' is not in the domain of '{}'", attribute.name())
                    )
                })
            }
        })
        .collect::<Result<Vec<f64>>>()
        .map(Example::new)
}

impl Dataset {
    /// # Overview
    ///
    /// Parses a dataset from a buffered reader.
    ///
    /// # Errors
    ///
    /// `Parse` with the 1-based line number of the first malformed line,
    /// `Io` if reading fails.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Dataset> {
        let mut parser = Parser::new();
        let mut last = 0;
        for (i, line) in reader.lines().enumerate() {
            last = i + 1;
            parser.line(last, &line?)?;
        }
        let dataset = parser.finish(last)?;
        debug!(
            name = dataset.name().unwrap_or_default(),
            attributes = dataset.attributes().len(),
            examples = dataset.len(),
            "parsed dataset"
        );
        Ok(dataset)
    }

    /// Reads and parses a dataset file.
    pub fn load(path: impl AsRef<Path>) -> Result<Dataset> {
        let path = path.as_ref();
        let dataset = Self::from_reader(BufReader::new(File::open(path)?))?;
        info!(path = %path.display(), examples = dataset.len(), "loaded dataset");
        Ok(dataset)
    }
}

impl FromStr for Dataset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_reader(s.as_bytes())
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "@dataset {}", self.name().unwrap_or("unnamed"))?;
        writeln!(f)?;
        write!(f, "{}", self.attributes)?;
        writeln!(f)?;
        writeln!(f, "@examples")?;
        writeln!(f)?;
        for example in &self.examples {
            let tokens: Vec<String> = example
                .values()
                .iter()
                .zip(self.attributes.iter())
                .map(|(&v, attribute)| {
                    if attribute.is_nominal() {
                        attribute
                            .value_at(v as usize)
                            .map_or_else(|| v.to_string(), str::to_owned)
                    } else {
                        v.to_string()
                    }
                })
                .collect();
            writeln!(f, "{}", tokens.join(" "))?;
        }
        Ok(())
    }
}

/// # Overview
///
/// A training set and an optional separate test set.
#[derive(Debug, Clone)]
pub struct TrainTestSets {
    pub train: Dataset,
    pub test:  Option<Dataset>
}

impl TrainTestSets {
    /// # Overview
    ///
    /// Loads the training file and, if given, the test file.
    ///
    /// # Errors
    ///
    /// Any load error, or `InvalidParameter` if the test set's attributes
    /// differ from the training set's.
    pub fn load(train: &Path, test: Option<&Path>) -> Result<Self> {
        let train = Dataset::load(train)?;
        let test = test.map(Dataset::load).transpose()?;
        if test
            .as_ref()
            .is_some_and(|t| t.attributes() != train.attributes())
        {
            return Err(Error::invalid("test", "attributes differ from the training set"));
        }
        Ok(Self {
            train,
            test
        })
    }
}
