use crate::core::path_set::ParameterPathSet;
use crate::domain::model::IndividualPropertiesCache;

/// Appends the incoming file's columns to the master cache, consuming it.
///
/// Only paths known to the base individual are merged. Values keep the order
/// in which the incoming cache lists its individuals, after everything that
/// was already merged.
pub fn merge_into(
    master: &mut IndividualPropertiesCache,
    incoming: IndividualPropertiesCache,
    path_set: &ParameterPathSet,
) {
    let (count, columns) = incoming.into_columns();

    for (path, values) in columns {
        if !path_set.contains(&path) {
            continue;
        }
        master.append(path, values);
    }

    master.add_individuals(count);
}
