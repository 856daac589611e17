mod helpers;
mod test_connection;
