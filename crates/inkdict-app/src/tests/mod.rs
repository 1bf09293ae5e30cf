mod socket_tests;
