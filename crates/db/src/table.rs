use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum Message {
    Table,
    Id,
    FirstName,
    LastName,
    EmailAddress,
    QueryType,
    Message,
    ServiceAgreement,
    CreatedAt,
}
