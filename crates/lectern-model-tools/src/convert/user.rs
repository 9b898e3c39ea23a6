use crate::convert::{FromDbModel, IntoDbModel};
use lectern_entity::user::Role as RoleModel;
use lectern_model::actor::Role;

impl FromDbModel<RoleModel> for Role {
    fn from_db_model(model: RoleModel) -> Self {
        match model {
            RoleModel::Student => Self::Student,
            RoleModel::Instructor => Self::Instructor,
        }
    }
}

impl IntoDbModel<RoleModel> for Role {
    fn into_db_model(self) -> RoleModel {
        match self {
            Self::Student => RoleModel::Student,
            Self::Instructor => RoleModel::Instructor,
        }
    }
}
