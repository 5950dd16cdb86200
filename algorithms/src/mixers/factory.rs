//! Mixer selection from constraint analysis

use super::{
    CardinalityMixer, CompositeMixer, InequalityMixer, Mixer, PartitionMixer, StandardMixer,
};
use vqo_model::{ConstraintInfo, ConstraintType};

/// Factory choosing the mixer that preserves a model's constraint pattern
pub struct MixerFactory;

impl MixerFactory {
    fn for_type(constraint_type: ConstraintType) -> Box<dyn Mixer> {
        match constraint_type {
            ConstraintType::Cardinality => Box::new(CardinalityMixer),
            ConstraintType::Partition => Box::new(PartitionMixer),
            ConstraintType::Inequality => Box::new(InequalityMixer),
            _ => Box::new(StandardMixer),
        }
    }

    /// Select the mixer for a constraint analysis result
    ///
    /// `Multiple` composes the detected types' mixers; anything unknown
    /// falls back to the standard X-mixer.
    pub fn for_constraints(info: &ConstraintInfo) -> Box<dyn Mixer> {
        let types = info.all_types();
        match types.as_slice() {
            [] | [ConstraintType::Unconstrained] => Box::new(StandardMixer),
            [single] => Self::for_type(*single),
            many => Box::new(CompositeMixer::new(
                many.iter().map(|&t| Self::for_type(t)).collect(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vqo_model::Comparator;

    fn info(constraint_type: ConstraintType) -> ConstraintInfo {
        ConstraintInfo {
            constraint_type,
            cardinality_k: None,
            inequality_bounds: Vec::new(),
            additional_constraints: Vec::new(),
        }
    }

    #[test]
    fn test_cardinality_selects_xy() {
        let mixer = MixerFactory::for_constraints(&info(ConstraintType::Cardinality));
        assert_eq!(mixer.name(), "cardinality");
    }

    #[test]
    fn test_unconstrained_selects_standard() {
        let mixer = MixerFactory::for_constraints(&info(ConstraintType::Unconstrained));
        assert_eq!(mixer.name(), "standard");
    }

    #[test]
    fn test_multiple_selects_composite() {
        let multi = ConstraintInfo {
            constraint_type: ConstraintType::Multiple,
            cardinality_k: Some(2.0),
            inequality_bounds: vec![(Comparator::LessEqual, 5.0)],
            additional_constraints: vec![
                ConstraintType::Cardinality,
                ConstraintType::Inequality,
            ],
        };
        let mixer = MixerFactory::for_constraints(&multi);
        assert_eq!(mixer.name(), "composite");
        // The composite emits both components' gates
        let ops = mixer.generate(3, 0);
        assert!(ops.len() > CardinalityMixer.generate(3, 0).len());
    }
}
