use crate::core::path_set::ParameterPathSet;
use crate::domain::model::{AdvancedParameter, DistributionType, IndividualPropertiesCache};

/// 為每個合併後、且建立個體時不會重新計算的路徑產生進階參數
/// 只能在所有檔案合併完成後執行
pub fn derive_advanced_parameters(
    master: &IndividualPropertiesCache,
    path_set: &ParameterPathSet,
) -> Vec<AdvancedParameter> {
    master
        .all_parameter_paths()
        .filter(|path| !path_set.is_fixed_by_construction(path))
        .map(|path| AdvancedParameter {
            parameter_path: path.clone(),
            distribution_type: DistributionType::Unknown,
            generate_random_values: false,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ParameterPath;
    use crate::domain::ports::BaseIndividual;

    #[derive(Clone)]
    struct AbcIndividual;

    impl BaseIndividual for AbcIndividual {
        fn all_parameter_paths(&self) -> Vec<ParameterPath> {
            vec!["A".into(), "B".into(), "C".into()]
        }

        fn create_individual_parameter_paths(&self) -> Vec<ParameterPath> {
            vec!["C".into()]
        }
    }

    #[test]
    fn test_skips_paths_fixed_by_construction() {
        let path_set = ParameterPathSet::from_individual(&AbcIndividual);
        let master = IndividualPropertiesCache::new(1)
            .with_values("A", vec![1.0])
            .unwrap()
            .with_values("B", vec![2.0])
            .unwrap()
            .with_values("C", vec![3.0])
            .unwrap();

        let parameters = derive_advanced_parameters(&master, &path_set);

        let paths: Vec<_> = parameters.iter().map(|p| p.parameter_path.as_str()).collect();
        assert_eq!(paths, vec!["A", "B"]);
        assert!(parameters
            .iter()
            .all(|p| p.distribution_type == DistributionType::Unknown && !p.generate_random_values));
    }

    #[test]
    fn test_empty_cache_yields_nothing() {
        let path_set = ParameterPathSet::from_individual(&AbcIndividual);
        assert!(derive_advanced_parameters(&IndividualPropertiesCache::default(), &path_set).is_empty());
    }
}
