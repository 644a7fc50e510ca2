mod test_admit_and_peers;
