pub use sea_orm_migration::{prelude::*, Migration, MigrationStatus};

mod m20250101_000001_create_table;

pub struct Migrator;

#[macro_export]
macro_rules! index_name {
    ($prefix:literal, $entity:path, $($column:path),+) => {
        concat!(
            $prefix, "_",
            stringify!($entity), "_",
            $(stringify!($column), "_"),+
        ).trim_end_matches('_')
    };
}

#[macro_export]
macro_rules! unique_index {
    ($entity:path, $($column:path),+) => {
        $crate::Index::create()
            .name($crate::index_name!("uq", $entity, $($column),+))
            .table($entity)
            $(.col($column))+
            .unique()
            .if_not_exists()
            .to_owned()
    };
}

#[macro_export]
macro_rules! index {
    ($entity:path, $($column:path),+) => {
        $crate::Index::create()
            .name($crate::index_name!("idx", $entity, $($column),+))
            .table($entity)
            $(.col($column))+
            .if_not_exists()
            .to_owned()
    };
}

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250101_000001_create_table::Migration)]
    }
}
