//! Per-table storage, replication and recovery settings, as exposed by the
//! `table_settings` object column.
//!
//! Duration-like leaves are not typed uniformly: `translog.interval`,
//! `translog.flush_threshold_period` and `unassigned.node_left.delayed_timeout`
//! are longs while `translog.sync_interval` is a string. Keep it that way
//! until the value providers agree on one representation.

use crate::system_catalog::settings_tree::ColumnDecl;
use crate::types::DataType;

pub const COLUMN: &str = "table_settings";

const BLOCKS: &[ColumnDecl] = &[
    ColumnDecl::leaf("read_only", DataType::Boolean),
    ColumnDecl::leaf("read", DataType::Boolean),
    ColumnDecl::leaf("write", DataType::Boolean),
    ColumnDecl::leaf("metadata", DataType::Boolean),
];

const TRANSLOG: &[ColumnDecl] = &[
    ColumnDecl::leaf("flush_threshold_ops", DataType::Integer),
    ColumnDecl::leaf("flush_threshold_size", DataType::Long),
    ColumnDecl::leaf("flush_threshold_period", DataType::Long),
    ColumnDecl::leaf("disable_flush", DataType::Boolean),
    ColumnDecl::leaf("interval", DataType::Long),
    ColumnDecl::leaf("sync_interval", DataType::String),
];

const ROUTING_ALLOCATION: &[ColumnDecl] = &[
    ColumnDecl::leaf("enable", DataType::String),
    ColumnDecl::leaf("total_shards_per_node", DataType::Integer),
];

const ROUTING: &[ColumnDecl] = &[ColumnDecl::object("allocation", ROUTING_ALLOCATION)];

const RECOVERY: &[ColumnDecl] = &[ColumnDecl::leaf("initial_shards", DataType::String)];

const WARMER: &[ColumnDecl] = &[ColumnDecl::leaf("enabled", DataType::Boolean)];

const UNASSIGNED_NODE_LEFT: &[ColumnDecl] = &[ColumnDecl::leaf("delayed_timeout", DataType::Long)];

const UNASSIGNED: &[ColumnDecl] = &[ColumnDecl::object("node_left", UNASSIGNED_NODE_LEFT)];

const TABLE_SETTINGS: &[ColumnDecl] = &[
    ColumnDecl::object("blocks", BLOCKS),
    ColumnDecl::object("translog", TRANSLOG),
    ColumnDecl::object("routing", ROUTING),
    ColumnDecl::object("recovery", RECOVERY),
    ColumnDecl::object("warmer", WARMER),
    ColumnDecl::object("unassigned", UNASSIGNED),
];

pub const DECL: ColumnDecl = ColumnDecl::object(COLUMN, TABLE_SETTINGS);
