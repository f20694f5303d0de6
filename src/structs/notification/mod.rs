pub mod inbox;
pub mod notification;
pub mod unread_notifications;
