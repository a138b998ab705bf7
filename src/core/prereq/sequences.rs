//! Enumeration of the linear course orderings a requisite tree allows

use super::node::PrereqNode;

/// Every alternative sequence of leaf values denoted by `node`.
///
/// - `Leaf` yields one single-element sequence
/// - `Or` concatenates the sequences of its children, keeping duplicates
/// - `And` takes the Cartesian product of its children in order, flattening
///   each tuple into one sequence
///
/// The result grows multiplicatively with each AND-joined OR group; use
/// [`count_sequences`] first when the input is untrusted.
#[must_use]
pub fn generate_sequences(node: &PrereqNode) -> Vec<Vec<String>> {
    match node {
        PrereqNode::Leaf(value) => vec![vec![value.clone()]],
        PrereqNode::Or(children) => children.iter().flat_map(generate_sequences).collect(),
        PrereqNode::And(children) => {
            children
                .iter()
                .map(generate_sequences)
                .fold(vec![Vec::new()], |prefixes, options| {
                    let mut product = Vec::with_capacity(prefixes.len() * options.len());
                    for prefix in &prefixes {
                        for option in &options {
                            let mut sequence = prefix.clone();
                            sequence.extend(option.iter().cloned());
                            product.push(sequence);
                        }
                    }
                    product
                })
        }
    }
}

/// Number of sequences [`generate_sequences`] would return, saturating at `usize::MAX`
#[must_use]
pub fn count_sequences(node: &PrereqNode) -> usize {
    match node {
        PrereqNode::Leaf(_) => 1,
        PrereqNode::Or(children) => children
            .iter()
            .map(count_sequences)
            .fold(0, usize::saturating_add),
        PrereqNode::And(children) => children
            .iter()
            .map(count_sequences)
            .fold(1, usize::saturating_mul),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::prereq::parse_requisites;

    fn leaf(value: &str) -> PrereqNode {
        PrereqNode::leaf(value)
    }

    fn seq(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_leaf() {
        assert_eq!(generate_sequences(&leaf("STAT 240")), vec![seq(&["STAT 240"])]);
    }

    #[test]
    fn test_and_distributes_over_or() {
        let node = PrereqNode::And(vec![
            PrereqNode::Or(vec![leaf("A1"), leaf("A2")]),
            PrereqNode::Or(vec![leaf("B1"), leaf("B2")]),
        ]);
        assert_eq!(
            generate_sequences(&node),
            vec![
                seq(&["A1", "B1"]),
                seq(&["A1", "B2"]),
                seq(&["A2", "B1"]),
                seq(&["A2", "B2"]),
            ]
        );
        assert_eq!(count_sequences(&node), 4);
    }

    #[test]
    fn test_or_keeps_duplicates() {
        let node = PrereqNode::Or(vec![
            leaf("A"),
            PrereqNode::Or(vec![leaf("A"), leaf("B")]),
            PrereqNode::And(vec![leaf("C"), leaf("D")]),
        ]);
        let sequences = generate_sequences(&node);
        assert_eq!(sequences.len(), 1 + 2 + 1);
        assert_eq!(sequences.len(), count_sequences(&node));
        assert_eq!(sequences[0], sequences[1]);
        assert_eq!(sequences[3], seq(&["C", "D"]));
    }

    #[test]
    fn test_requisite_scenarios() {
        let alternatives = parse_requisites("COMP SCI 200, MATH 222").unwrap();
        assert_eq!(
            generate_sequences(&alternatives),
            vec![seq(&["COMP SCI 200"]), seq(&["MATH 222"])]
        );

        let grouped = parse_requisites("MATH 221 and (MATH 222 or MATH 234)").unwrap();
        assert_eq!(
            generate_sequences(&grouped),
            vec![seq(&["MATH 221", "MATH 222"]), seq(&["MATH 221", "MATH 234"])]
        );
    }

    #[test]
    fn test_count_saturates() {
        let wide = PrereqNode::Or((0..1000).map(|idx| leaf(&idx.to_string())).collect());
        let node = PrereqNode::And(vec![wide; 8]);
        assert_eq!(count_sequences(&node), usize::MAX);
    }
}
