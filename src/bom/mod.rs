//! Bill-of-materials aggregation.
//!
//! Links are resolved to part instances, counted per linked part, their part
//! information is split into dedicated and misc columns, and the result is
//! laid out as a [`ReportGrid`].

pub mod columns;
pub mod dedup;
pub mod grid;

use tracing::{debug, warn};

use crate::error::{Result, ToolError};
use crate::info::read_info;
use crate::model::{
    Assembly, MISC_KEY, MetadataRecord, NAME_KEY, PartInstance, QUANTITY_KEY, is_reserved_key,
};

pub use columns::{DEFAULT_THRESHOLD, order_columns, rank, select_columns};
pub use dedup::{deduplicate, group_by};
pub use grid::{DEFAULT_TITLE, GridCell, ReportGrid, build_grid};

/// A distinct part with its occurrence count and part information.
#[derive(Debug, Clone)]
pub struct PartGroup<'a> {
    pub instance: PartInstance<'a>,
    pub count: usize,
    pub info: MetadataRecord,
}

/// How dedicated columns are chosen.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnPolicy {
    /// Promote fields defined by at least this share of the distinct parts.
    Threshold(f64),
    /// Use exactly these fields, in this order.
    Required(Vec<String>),
}

impl Default for ColumnPolicy {
    fn default() -> Self {
        ColumnPolicy::Threshold(DEFAULT_THRESHOLD)
    }
}

impl ColumnPolicy {
    /// Rejects thresholds outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        match self {
            ColumnPolicy::Threshold(threshold) if !(0.0..=1.0).contains(threshold) => {
                Err(ToolError::InvalidThreshold(*threshold))
            }
            _ => Ok(()),
        }
    }

    /// Resolves the dedicated columns, `Name` and `Quantity` first.
    pub fn resolve<'r>(&self, records: impl IntoIterator<Item = &'r MetadataRecord>) -> Vec<String> {
        match self {
            ColumnPolicy::Threshold(threshold) => {
                let mut keys = vec![NAME_KEY.to_string(), QUANTITY_KEY.to_string()];
                keys.extend(select_columns(records, *threshold));
                order_columns(keys)
            }
            ColumnPolicy::Required(fields) => {
                let mut keys = vec![NAME_KEY.to_string(), QUANTITY_KEY.to_string()];
                for field in fields {
                    if is_reserved_key(field) || field == MISC_KEY || keys.contains(field) {
                        continue;
                    }
                    keys.push(field.clone());
                }
                keys
            }
        }
    }
}

/// Resolves every link of the assembly that places a part or body.
pub fn collect_instances(assembly: &Assembly) -> Vec<PartInstance<'_>> {
    let mut instances = Vec::with_capacity(assembly.links.len());
    for link in &assembly.links {
        match assembly.part(&link.linked) {
            Some(part) if part.kind.is_container() => instances.push(PartInstance { link, part }),
            Some(part) => debug!(link = %link.id, part = %part.id, "skipping non-container link"),
            None => warn!(link = %link.id, target = %link.linked, "link target not found"),
        }
    }
    instances
}

/// Counts instances per linked part and reads each part's information.
pub fn group_parts<'a>(instances: &[PartInstance<'a>]) -> Vec<PartGroup<'a>> {
    deduplicate(instances)
        .into_iter()
        .map(|(instance, count)| PartGroup {
            instance,
            count,
            info: read_info(instance.part),
        })
        .collect()
}

/// Runs the full aggregation for a set of instances.
pub fn build_bom(
    instances: &[PartInstance<'_>],
    policy: &ColumnPolicy,
    title: &str,
) -> Result<ReportGrid> {
    policy.validate()?;
    let groups = group_parts(instances);
    let columns = policy.resolve(groups.iter().map(|group| &group.info));
    debug!(
        group_count = groups.len(),
        column_count = columns.len() + 1,
        "BOM columns resolved"
    );
    Ok(build_grid(&groups, &columns, title))
}
