use crate::error::{NetError, Result};
use crate::network::topology::Topology;

/// A topology, an input sequence and the single target every element is
/// trained against.
#[derive(Debug, Clone, PartialEq)]
pub struct RunRequest {
    pub topology: Topology,
    pub inputs: Vec<Vec<f64>>,
    pub target: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Topology,
    In,
    Out,
}

impl Section {
    fn from_marker(token: &str) -> Option<(Section, &str)> {
        [("topology:", Section::Topology), ("in:", Section::In), ("out:", Section::Out)]
            .into_iter()
            .find_map(|(marker, section)| token.strip_prefix(marker).map(|rest| (section, rest)))
    }
}

impl RunRequest {
    /// The network trained when no request is given: a 3-2-1 topology fed
    /// three input vectors against the target `0.5`.
    pub fn example() -> RunRequest {
        RunRequest {
            topology: Topology::new(vec![3, 2, 1]).expect("example topology is valid"),
            inputs: vec![
                vec![0.1, 0.2, 0.3],
                vec![0.4, 0.5, 0.6],
                vec![0.7, 0.8, 0.9],
            ],
            target: vec![0.5],
        }
    }

    /// Parses `topology: <widths…> in: <values…> out: <values…>`.
    ///
    /// Tokens are split on whitespace first, so both `["topology:", "3", "2"]`
    /// and `["topology: 3 2"]` work, and a marker may be glued to its first
    /// value (`topology:3`). `in:` values are chunked by the input width into
    /// the input sequence.
    pub fn parse_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<RunRequest> {
        let mut topology: Option<Vec<usize>> = None;
        let mut inputs: Option<Vec<f64>> = None;
        let mut target: Option<Vec<f64>> = None;
        let mut current: Option<Section> = None;

        let words = tokens.iter().flat_map(|t| t.as_ref().split_whitespace());
        for word in words {
            let value = match Section::from_marker(word) {
                Some((section, rest)) => {
                    let slot_taken = match section {
                        Section::Topology => topology.replace(Vec::new()).is_some(),
                        Section::In => inputs.replace(Vec::new()).is_some(),
                        Section::Out => target.replace(Vec::new()).is_some(),
                    };
                    if slot_taken {
                        return Err(NetError::Parse(format!("section `{word}` given twice")));
                    }
                    current = Some(section);
                    if rest.is_empty() {
                        continue;
                    }
                    rest
                }
                None => word,
            };

            match current {
                None => return Err(NetError::Parse(format!("value `{value}` before any section marker"))),
                Some(Section::Topology) => {
                    let width = value.parse::<usize>()
                        .map_err(|_| NetError::Parse(format!("invalid layer width `{value}`")))?;
                    topology.get_or_insert_with(Vec::new).push(width);
                }
                Some(Section::In) => inputs.get_or_insert_with(Vec::new).push(parse_number(value)?),
                Some(Section::Out) => target.get_or_insert_with(Vec::new).push(parse_number(value)?),
            }
        }

        let topology = Topology::new(topology.ok_or_else(|| missing("topology:"))?)?;
        let flat_inputs = inputs.ok_or_else(|| missing("in:"))?;
        let target = target.ok_or_else(|| missing("out:"))?;

        let width = topology.input_size();
        if flat_inputs.is_empty() || flat_inputs.len() % width != 0 {
            return Err(NetError::Parse(format!(
                "got {} input values, need a positive multiple of the input width {width}",
                flat_inputs.len()
            )));
        }
        if target.len() != topology.output_size() {
            return Err(NetError::TargetWidth { expected: topology.output_size(), got: target.len() });
        }

        let inputs = flat_inputs.chunks(width).map(<[f64]>::to_vec).collect();
        Ok(RunRequest { topology, inputs, target })
    }
}

fn parse_number(value: &str) -> Result<f64> {
    match value.parse::<f64>() {
        Ok(x) if x.is_finite() => Ok(x),
        _ => Err(NetError::Parse(format!("invalid number `{value}`"))),
    }
}

fn missing(marker: &str) -> NetError {
    NetError::Parse(format!("missing `{marker}` section"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_separate_tokens() {
        let tokens = ["topology:", "3", "2", "1", "in:", "0.1", "0.2", "0.3", "out:", "0.5"];
        let request = RunRequest::parse_tokens(&tokens).unwrap();

        assert_eq!(request.topology.layers(), &[3, 2, 1]);
        assert_eq!(request.inputs, vec![vec![0.1, 0.2, 0.3]]);
        assert_eq!(request.target, vec![0.5]);
    }

    #[test]
    fn parses_grouped_and_glued_markers() {
        let request = RunRequest::parse_tokens(&["topology: 1", "in: 1", "out: 1"]).unwrap();
        assert_eq!(request.topology.layers(), &[1]);
        assert_eq!(request.inputs, vec![vec![1.0]]);

        let request = RunRequest::parse_tokens(&["topology:2", "1", "in:0", "1", "1", "0", "out:1"]).unwrap();
        assert_eq!(request.inputs, vec![vec![0.0, 1.0], vec![1.0, 0.0]]);
    }

    #[test]
    fn chunks_inputs_into_a_sequence() {
        let tokens = ["topology: 3 2 1", "in: 0.1 0.2 0.3 0.4 0.5 0.6 0.7 0.8 0.9", "out: 0.5"];
        let request = RunRequest::parse_tokens(&tokens).unwrap();
        assert_eq!(request.inputs, RunRequest::example().inputs);
    }

    #[test]
    fn rejects_malformed_requests() {
        let cases: &[&[&str]] = &[
            &["topology: 3 2 1", "in: 0.1 0.2", "out: 0.5"],
            &["topology: 3 2 1", "in: 0.1 0.2 0.3", "out: 0.5 0.5"],
            &["topology: 3 x 1", "in: 0.1 0.2 0.3", "out: 0.5"],
            &["topology: 2 1", "in: 0.1 nan", "out: 0.5"],
            &["topology: 2 1", "in: 0.1 0.2"],
            &["0.3", "topology: 2 1", "in: 0.1 0.2", "out: 1"],
            &["topology: 2 1", "topology: 2 1", "in: 0.1 0.2", "out: 1"],
            &["topology: 2 0", "in: 0.1 0.2", "out: 1"],
            &["topology: 2 1", "in:", "out: 1"],
        ];
        for tokens in cases {
            assert!(RunRequest::parse_tokens(*tokens).is_err(), "accepted {tokens:?}");
        }
    }

    #[test]
    fn rejects_oversized_topologies() {
        let cases: &[&[&str]] = &[
            &["topology: 1 18446744073709551615 1", "in: 1", "out: 1"],
            &["topology: 1 5000 1", "in: 1", "out: 1"],
            &["topology: 1 4096 4096 1", "in: 1", "out: 1"],
        ];
        for tokens in cases {
            let err = RunRequest::parse_tokens(*tokens).unwrap_err();
            assert!(matches!(err, NetError::TooLarge(_)), "{tokens:?} gave {err}");
        }
    }
}
