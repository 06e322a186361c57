use crate::domain::model::ParameterPath;
use crate::domain::ports::BaseIndividual;
use std::collections::HashSet;

/// 基礎個體參數路徑的快照，每次執行建立一次，所有匯入任務唯讀共用
#[derive(Debug, Clone, Default)]
pub struct ParameterPathSet {
    all: HashSet<ParameterPath>,
    fixed_by_construction: HashSet<ParameterPath>,
}

impl ParameterPathSet {
    /// 忽略個體不認得的重算路徑，`fixed_by_construction` 必為 `all` 的子集
    pub fn from_individual<I: BaseIndividual>(individual: &I) -> Self {
        let all: HashSet<ParameterPath> = individual.all_parameter_paths().into_iter().collect();
        let fixed_by_construction = individual
            .create_individual_parameter_paths()
            .into_iter()
            .filter(|path| all.contains(path))
            .collect();

        Self {
            all,
            fixed_by_construction,
        }
    }

    pub fn contains(&self, path: &ParameterPath) -> bool {
        self.all.contains(path)
    }

    pub fn is_fixed_by_construction(&self, path: &ParameterPath) -> bool {
        self.fixed_by_construction.contains(path)
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    pub fn fixed_by_construction_len(&self) -> usize {
        self.fixed_by_construction.len()
    }
}
