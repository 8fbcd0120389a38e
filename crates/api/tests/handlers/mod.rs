mod admin_test;
mod auth_test;
mod court_test;
mod middleware_test;
mod venue_test;
