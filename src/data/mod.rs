/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .tsv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → SurveyTable (once, at startup)
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ SurveyTable  │  Vec<Record>, shared read-only
///   └─────────────┘
///        │  Selection (group, subgroups, time periods)
///        ▼
///   ┌──────────┐
///   │  filter   │  conjunctive predicate → FilteredView
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  mean Value per subgroup → Vec<AggregateRow>
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
