//! UI Components
//!
//! Thin subscribers over the store; all invariants live in the tree
//! core, the coordinator, and the forest routing.

mod card_tree_view;
mod category_panel;
mod delete_confirm_button;
mod move_menu;
mod new_card_form;
mod notice_bar;
mod tree_node;

pub use card_tree_view::CardTreeView;
pub use category_panel::CategoryPanel;
pub use delete_confirm_button::DeleteConfirmButton;
pub use move_menu::MoveMenu;
pub use new_card_form::NewCardForm;
pub use notice_bar::NoticeBar;
pub use tree_node::TreeNode;
