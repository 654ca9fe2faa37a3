use super::StaffRole;

#[derive(Debug, Clone)]
pub struct CreateStaffDto {
    pub name: String,
    pub email: String,
    pub role: StaffRole,
    pub shift_preferences: Vec<String>,
    /// Id of the admin creating the record
    pub created_by: Option<String>,
}

impl CreateStaffDto {
    /// Trim `name`, trim and lower-case `email`.
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.email = self.email.trim().to_lowercase();
        self
    }
}
