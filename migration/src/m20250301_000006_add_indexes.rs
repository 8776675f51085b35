use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Skills {
    Table,
    CategoryId,
}

#[derive(DeriveIden)]
enum Projects {
    Table,
    UserId,
    CategoryId,
}

#[derive(DeriveIden)]
enum SampleWorks {
    Table,
    UserId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_skills_category_id")
                    .table(Skills::Table)
                    .col(Skills::CategoryId)
                    .to_owned(),
            )
            .await?;

        // Ownership lookups filter on (id, user_id).
        manager
            .create_index(
                Index::create()
                    .name("idx_projects_user_id")
                    .table(Projects::Table)
                    .col(Projects::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_projects_category_id")
                    .table(Projects::Table)
                    .col(Projects::CategoryId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sample_works_user_id")
                    .table(SampleWorks::Table)
                    .col(SampleWorks::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_skills_category_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_projects_user_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_projects_category_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_sample_works_user_id").to_owned())
            .await?;

        Ok(())
    }
}
