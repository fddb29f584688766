use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Flights {
    Table,
    Id,
    Airline,
    Supplier,
    Fare,
    DepartureAirport,
    DestinationAirport,
    DepartureTime,
    ArrivalTime,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Flights::Table)
                    .if_not_exists()
                    // SQLite only auto-increments an INTEGER primary key
                    .col(
                        ColumnDef::new(Flights::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Flights::Airline).string().not_null())
                    .col(ColumnDef::new(Flights::Supplier).string().not_null())
                    .col(ColumnDef::new(Flights::Fare).double().not_null())
                    .col(ColumnDef::new(Flights::DepartureAirport).string().not_null())
                    .col(ColumnDef::new(Flights::DestinationAirport).string().not_null())
                    .col(ColumnDef::new(Flights::DepartureTime).date_time().not_null())
                    .col(ColumnDef::new(Flights::ArrivalTime).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_flights_route")
                    .table(Flights::Table)
                    .col(Flights::DepartureAirport)
                    .col(Flights::DestinationAirport)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Flights::Table).to_owned())
            .await
    }
}
