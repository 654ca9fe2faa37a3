#[derive(Debug, Clone)]
pub struct CreateAdminDto {
    pub username: String,
    pub password_hash: String,
    pub name: String,
}
