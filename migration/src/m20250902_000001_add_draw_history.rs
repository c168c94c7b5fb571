use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Participants {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Prizes {
    Table,
    Id,
}

/// 每个奖项的一次抽奖执行
#[derive(DeriveIden)]
enum DrawSessions {
    Table,
    Id,
    PrizeId,
    CreatedAt,
    FinishedAt,
}

/// 中奖记录 (只追加)
#[derive(DeriveIden)]
enum DrawRecords {
    Table,
    Id,
    SessionId,
    ParticipantId,
    DrawnAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// 外键一律 RESTRICT，不做级联删除：
/// 有中奖历史的奖项 / 参与者不能被物理删除
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DrawSessions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DrawSessions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DrawSessions::PrizeId).big_integer().not_null())
                    .col(
                        ColumnDef::new(DrawSessions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(DrawSessions::FinishedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_draw_session_prize")
                            .from(DrawSessions::Table, DrawSessions::PrizeId)
                            .to(Prizes::Table, Prizes::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_draw_sessions_prize")
                    .table(DrawSessions::Table)
                    .col(DrawSessions::PrizeId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DrawRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DrawRecords::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DrawRecords::SessionId).big_integer().not_null())
                    .col(
                        ColumnDef::new(DrawRecords::ParticipantId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DrawRecords::DrawnAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_draw_record_session")
                            .from(DrawRecords::Table, DrawRecords::SessionId)
                            .to(DrawSessions::Table, DrawSessions::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_draw_record_participant")
                            .from(DrawRecords::Table, DrawRecords::ParticipantId)
                            .to(Participants::Table, Participants::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        // 同一 session 内同一参与者只能中奖一次
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_draw_records_session_participant_unique")
                    .table(DrawRecords::Table)
                    .col(DrawRecords::SessionId)
                    .col(DrawRecords::ParticipantId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_draw_records_participant")
                    .table(DrawRecords::Table)
                    .col(DrawRecords::ParticipantId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 删除顺序：记录 -> session
        manager
            .drop_table(Table::drop().table(DrawRecords::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DrawSessions::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}
