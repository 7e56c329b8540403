mod center;
mod dialogs;
mod status;
mod top;
