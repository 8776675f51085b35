use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `sample_works` table and its columns.
#[derive(DeriveIden)]
enum SampleWorks {
    Table,
    Id,
    UserId,
    Name,
    Description,
    Skill,
    Image,
    CreatedAt,
}

/// Re-declare parent table identifiers for foreign-key references.
#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SampleWorks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SampleWorks::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SampleWorks::UserId).integer().not_null())
                    .col(ColumnDef::new(SampleWorks::Name).string_len(255).not_null())
                    .col(ColumnDef::new(SampleWorks::Description).text().not_null())
                    .col(ColumnDef::new(SampleWorks::Skill).string_len(255).not_null())
                    .col(ColumnDef::new(SampleWorks::Image).string().null())
                    .col(
                        ColumnDef::new(SampleWorks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sample_works_user_id")
                            .from(SampleWorks::Table, SampleWorks::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SampleWorks::Table).to_owned())
            .await
    }
}
