mod data;
mod health_check;
mod helpers;
mod reasons;
mod wizard;
